//! Keccak-f[1600] sponge core (internal).
//!
//! Implements the round-3 Keccak submission: domain byte `0x01`, not the
//! FIPS 202 `0x06`. The state is stored in the lane-complemented
//! representation: after [`KeccakState::reset`] the words at indices
//! {1, 2, 8, 12, 17, 20} hold all-ones, and the complement is stripped
//! around the permutation and when squeezing, so digests match the plain
//! permutation bit for bit.

#![allow(clippy::indexing_slicing)] // Keccak state is fixed-size; indexing is audited

use zeroize::Zeroize;

/// Round-3 Keccak domain separation byte (`pad10*1` starts with 0x01).
pub(crate) const DOMAIN_KECCAK: u8 = 0x01;

/// Lanes stored complemented between permutation calls.
const INVERTED_LANES: [usize; 6] = [1, 2, 8, 12, 17, 20];

const KECCAKF_ROUNDS: usize = 24;

// Round constants.
const RC: [u64; KECCAKF_ROUNDS] = [
  0x0000_0000_0000_0001,
  0x0000_0000_0000_8082,
  0x8000_0000_0000_808a,
  0x8000_0000_8000_8000,
  0x0000_0000_0000_808b,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8009,
  0x0000_0000_0000_008a,
  0x0000_0000_0000_0088,
  0x0000_0000_8000_8009,
  0x0000_0000_8000_000a,
  0x0000_0000_8000_808b,
  0x8000_0000_0000_008b,
  0x8000_0000_0000_8089,
  0x8000_0000_0000_8003,
  0x8000_0000_0000_8002,
  0x8000_0000_0000_0080,
  0x0000_0000_0000_800a,
  0x8000_0000_8000_000a,
  0x8000_0000_8000_8081,
  0x8000_0000_0000_8080,
  0x0000_0000_8000_0001,
  0x8000_0000_8000_8008,
];

#[inline(always)]
pub(crate) fn keccakf(state: &mut [u64; 25]) {
  let mut a0 = state[0];
  let mut a1 = state[1];
  let mut a2 = state[2];
  let mut a3 = state[3];
  let mut a4 = state[4];
  let mut a5 = state[5];
  let mut a6 = state[6];
  let mut a7 = state[7];
  let mut a8 = state[8];
  let mut a9 = state[9];
  let mut a10 = state[10];
  let mut a11 = state[11];
  let mut a12 = state[12];
  let mut a13 = state[13];
  let mut a14 = state[14];
  let mut a15 = state[15];
  let mut a16 = state[16];
  let mut a17 = state[17];
  let mut a18 = state[18];
  let mut a19 = state[19];
  let mut a20 = state[20];
  let mut a21 = state[21];
  let mut a22 = state[22];
  let mut a23 = state[23];
  let mut a24 = state[24];

  for &rc in &RC {
    // θ
    let c0 = a0 ^ a5 ^ a10 ^ a15 ^ a20;
    let c1 = a1 ^ a6 ^ a11 ^ a16 ^ a21;
    let c2 = a2 ^ a7 ^ a12 ^ a17 ^ a22;
    let c3 = a3 ^ a8 ^ a13 ^ a18 ^ a23;
    let c4 = a4 ^ a9 ^ a14 ^ a19 ^ a24;

    let d0 = c4 ^ c1.rotate_left(1);
    let d1 = c0 ^ c2.rotate_left(1);
    let d2 = c1 ^ c3.rotate_left(1);
    let d3 = c2 ^ c4.rotate_left(1);
    let d4 = c3 ^ c0.rotate_left(1);

    a0 ^= d0;
    a5 ^= d0;
    a10 ^= d0;
    a15 ^= d0;
    a20 ^= d0;

    a1 ^= d1;
    a6 ^= d1;
    a11 ^= d1;
    a16 ^= d1;
    a21 ^= d1;

    a2 ^= d2;
    a7 ^= d2;
    a12 ^= d2;
    a17 ^= d2;
    a22 ^= d2;

    a3 ^= d3;
    a8 ^= d3;
    a13 ^= d3;
    a18 ^= d3;
    a23 ^= d3;

    a4 ^= d4;
    a9 ^= d4;
    a14 ^= d4;
    a19 ^= d4;
    a24 ^= d4;

    // ρ + π
    let b0 = a0;
    let b10 = a1.rotate_left(1);
    let b20 = a2.rotate_left(62);
    let b5 = a3.rotate_left(28);
    let b15 = a4.rotate_left(27);

    let b16 = a5.rotate_left(36);
    let b1 = a6.rotate_left(44);
    let b11 = a7.rotate_left(6);
    let b21 = a8.rotate_left(55);
    let b6 = a9.rotate_left(20);

    let b7 = a10.rotate_left(3);
    let b17 = a11.rotate_left(10);
    let b2 = a12.rotate_left(43);
    let b12 = a13.rotate_left(25);
    let b22 = a14.rotate_left(39);

    let b23 = a15.rotate_left(41);
    let b8 = a16.rotate_left(45);
    let b18 = a17.rotate_left(15);
    let b3 = a18.rotate_left(21);
    let b13 = a19.rotate_left(8);

    let b14 = a20.rotate_left(18);
    let b24 = a21.rotate_left(2);
    let b9 = a22.rotate_left(61);
    let b19 = a23.rotate_left(56);
    let b4 = a24.rotate_left(14);

    // χ
    a0 = b0 ^ ((!b1) & b2);
    a1 = b1 ^ ((!b2) & b3);
    a2 = b2 ^ ((!b3) & b4);
    a3 = b3 ^ ((!b4) & b0);
    a4 = b4 ^ ((!b0) & b1);

    a5 = b5 ^ ((!b6) & b7);
    a6 = b6 ^ ((!b7) & b8);
    a7 = b7 ^ ((!b8) & b9);
    a8 = b8 ^ ((!b9) & b5);
    a9 = b9 ^ ((!b5) & b6);

    a10 = b10 ^ ((!b11) & b12);
    a11 = b11 ^ ((!b12) & b13);
    a12 = b12 ^ ((!b13) & b14);
    a13 = b13 ^ ((!b14) & b10);
    a14 = b14 ^ ((!b10) & b11);

    a15 = b15 ^ ((!b16) & b17);
    a16 = b16 ^ ((!b17) & b18);
    a17 = b17 ^ ((!b18) & b19);
    a18 = b18 ^ ((!b19) & b15);
    a19 = b19 ^ ((!b15) & b16);

    a20 = b20 ^ ((!b21) & b22);
    a21 = b21 ^ ((!b22) & b23);
    a22 = b22 ^ ((!b23) & b24);
    a23 = b23 ^ ((!b24) & b20);
    a24 = b24 ^ ((!b20) & b21);

    // ι
    a0 ^= rc;
  }

  state[0] = a0;
  state[1] = a1;
  state[2] = a2;
  state[3] = a3;
  state[4] = a4;
  state[5] = a5;
  state[6] = a6;
  state[7] = a7;
  state[8] = a8;
  state[9] = a9;
  state[10] = a10;
  state[11] = a11;
  state[12] = a12;
  state[13] = a13;
  state[14] = a14;
  state[15] = a15;
  state[16] = a16;
  state[17] = a17;
  state[18] = a18;
  state[19] = a19;
  state[20] = a20;
  state[21] = a21;
  state[22] = a22;
  state[23] = a23;
  state[24] = a24;
}

/// One sponge lane: 25 state words plus a message byte counter.
///
/// `RATE` is the absorption width in bytes (136 for the 256-bit digest,
/// 72 for the 512-bit one). The counter tracks message bytes only; the
/// caller decides what counts as message (personalization blocks do not).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeccakState<const RATE: usize> {
  h: [u64; 25],
  t: u64,
}

impl<const RATE: usize> Default for KeccakState<RATE> {
  #[inline]
  fn default() -> Self {
    let mut state = Self { h: [0u64; 25], t: 0 };
    state.reset();
    state
  }
}

impl<const RATE: usize> KeccakState<RATE> {
  /// Zero the state, re-apply the complemented-lane mask, clear the counter.
  pub(crate) fn reset(&mut self) {
    self.h = [0u64; 25];
    for i in INVERTED_LANES {
      self.h[i] = u64::MAX;
    }
    self.t = 0;
  }

  #[inline]
  pub(crate) const fn increase(&mut self, bytes: u64) {
    self.t = self.t.wrapping_add(bytes);
  }

  #[cfg(test)]
  pub(crate) const fn bytes_absorbed(&self) -> u64 {
    self.t
  }

  #[cfg(test)]
  pub(crate) const fn words(&self) -> &[u64; 25] {
    &self.h
  }

  /// Run the permutation on the complemented representation.
  #[inline(always)]
  fn permute(&mut self) {
    for i in INVERTED_LANES {
      self.h[i] = !self.h[i];
    }
    keccakf(&mut self.h);
    for i in INVERTED_LANES {
      self.h[i] = !self.h[i];
    }
  }

  #[inline(always)]
  fn absorb_block(&mut self, block: &[u8; RATE]) {
    debug_assert_eq!(RATE % 8, 0);
    let lanes = RATE / 8;
    let (chunks, _) = block.as_chunks::<8>();
    for (lane, chunk) in self.h[..lanes].iter_mut().zip(chunks.iter()) {
      *lane ^= u64::from_le_bytes(*chunk);
    }
    self.permute();
  }

  /// Absorb `data`, which must be a whole number of rate blocks.
  pub(crate) fn absorb_blocks(&mut self, data: &[u8]) {
    debug_assert_eq!(data.len() % RATE, 0);
    let (blocks, _) = data.as_chunks::<RATE>();
    for block in blocks {
      self.absorb_block(block);
    }
  }

  /// Absorb `tail` (any length), apply `pad10*1` with the `0x01` domain
  /// byte, and squeeze `out.len()` bytes (`out.len() <= RATE`).
  pub(crate) fn finalize_into(&mut self, tail: &[u8], out: &mut [u8]) {
    let (blocks, rest) = tail.as_chunks::<RATE>();
    for block in blocks {
      self.absorb_block(block);
    }

    let mut pad = [0u8; RATE];
    pad[..rest.len()].copy_from_slice(rest);
    pad[rest.len()] ^= DOMAIN_KECCAK;
    pad[RATE - 1] ^= 0x80;
    self.absorb_block(&pad);

    self.squeeze_into(out);
  }

  /// Copy the first `out.len()` state bytes, little-endian lane order,
  /// stripping the lane complement.
  fn squeeze_into(&self, mut out: &mut [u8]) {
    debug_assert!(out.len() <= RATE);
    let mut lane = 0usize;
    while !out.is_empty() {
      let word = if INVERTED_LANES.contains(&lane) {
        !self.h[lane]
      } else {
        self.h[lane]
      };
      let bytes = word.to_le_bytes();
      let take = core::cmp::min(8, out.len());
      out[..take].copy_from_slice(&bytes[..take]);
      out = &mut out[take..];
      lane += 1;
    }
  }
}

impl<const RATE: usize> Zeroize for KeccakState<RATE> {
  fn zeroize(&mut self) {
    self.h.zeroize();
    self.t.zeroize();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keccakf_zero_vector_matches_known_state() {
    // Known output of Keccak-f[1600] applied to an all-zero state.
    // (This vector is widely used for self-tests across implementations.)
    let expected: [u64; 25] = [
      0xF1258F7940E1DDE7,
      0x84D5CCF933C0478A,
      0xD598261EA65AA9EE,
      0xBD1547306F80494D,
      0x8B284E056253D057,
      0xFF97A42D7F8E6FD4,
      0x90FEE5A0A44647C4,
      0x8C5BDA0CD6192E76,
      0xAD30A6F71B19059C,
      0x30935AB7D08FFC64,
      0xEB5AA93F2317D635,
      0xA9A6E6260D712103,
      0x81A57C16DBCF555F,
      0x43B831CD0347C826,
      0x01F22F1A11A5569F,
      0x05E5635A21D9AE61,
      0x64BEFEF28CC970F2,
      0x613670957BC46611,
      0xB87C5A554FD00ECB,
      0x8C3EE88A1CCF32C8,
      0x940C7922AE3A2614,
      0x1841F924A2C509E4,
      0x16F53526E70465C2,
      0x75F644E97F30A13B,
      0xEAF1FF7B5CECA249,
    ];

    let mut state = [0u64; 25];
    keccakf(&mut state);
    assert_eq!(state, expected);
  }

  #[test]
  fn reset_applies_lane_complement_mask() {
    let state = KeccakState::<136>::default();
    for (i, &word) in state.words().iter().enumerate() {
      if INVERTED_LANES.contains(&i) {
        assert_eq!(word, u64::MAX, "lane {i} should be complemented");
      } else {
        assert_eq!(word, 0, "lane {i} should be zero");
      }
    }
    assert_eq!(state.bytes_absorbed(), 0);
  }

  #[test]
  fn complemented_permutation_matches_plain() {
    // Applying the masked permutation to the masked zero state must land on
    // the mask of the plain permutation of zero.
    let mut plain = [0u64; 25];
    keccakf(&mut plain);

    let mut masked = KeccakState::<136>::default();
    masked.permute();
    for (i, &word) in masked.words().iter().enumerate() {
      let expected = if INVERTED_LANES.contains(&i) { !plain[i] } else { plain[i] };
      assert_eq!(word, expected, "lane {i}");
    }
  }

  #[test]
  fn counter_tracks_what_the_caller_reports() {
    let mut state = KeccakState::<136>::default();
    state.increase(136);
    state.increase(7);
    assert_eq!(state.bytes_absorbed(), 143);
    state.reset();
    assert_eq!(state.bytes_absorbed(), 0);
  }

  #[test]
  fn zeroize_clears_state() {
    let mut state = KeccakState::<72>::default();
    state.absorb_blocks(&[0xAA; 72]);
    state.increase(72);
    state.zeroize();
    assert_eq!(state.words(), &[0u64; 25]);
    assert_eq!(state.bytes_absorbed(), 0);
  }
}
