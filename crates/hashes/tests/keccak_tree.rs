//! Tree-parallel mode: determinism, fan-out separation, and edge cases.

use hashes::{
  Digest as _, DigestError,
  crypto::{Keccak256, Keccak512, KeccakParams},
};

fn tree_digest_256(data: &[u8], fan_out: usize) -> [u8; 32] {
  let params = KeccakParams::new(256, fan_out, 4).unwrap();
  let mut h = Keccak256::with_params(params).unwrap();
  let mut out = [0u8; 32];
  h.compute(data, &mut out).unwrap();
  out
}

#[test]
fn fan_out_separates_digests() {
  let data = vec![0x61u8; 10 << 20];

  let sequential = Keccak256::digest(&data);
  let mut digests = vec![sequential];

  for fan_out in [2usize, 4, 8] {
    let first = tree_digest_256(&data, fan_out);
    let second = tree_digest_256(&data, fan_out);
    assert_eq!(first, second, "fan-out {fan_out} must be deterministic");
    digests.push(first);
  }

  for i in 0..digests.len() {
    for j in i + 1..digests.len() {
      assert_ne!(digests[i], digests[j], "configurations {i} and {j} must separate");
    }
  }
}

#[test]
fn tree_chunking_is_invariant_around_the_parallel_block() {
  let params = KeccakParams::new(512, 4, 2).unwrap();
  let pbs = Keccak512::with_params(params).unwrap().parallel_block_size();

  for len in [0, 1, pbs - 1, pbs, pbs + 1, 3 * pbs + 17] {
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();

    let mut h = Keccak512::with_params(params).unwrap();
    let mut expected = [0u8; 64];
    h.compute(&data, &mut expected).unwrap();

    for step in [1usize, 7, 64, pbs] {
      let mut h = Keccak512::with_params(params).unwrap();
      for chunk in data.chunks(step) {
        h.update(chunk).unwrap();
      }
      let mut out = [0u8; 64];
      h.finalize_into(&mut out).unwrap();
      assert_eq!(out, expected, "len {len}, step {step}");
    }
  }
}

#[test]
fn parallel_differs_from_sequential_even_for_empty_input() {
  // Leaves absorb the personalization block, so even the empty tree digest
  // is separated from the plain sponge.
  let params = KeccakParams::new(256, 2, 1).unwrap();
  let mut h = Keccak256::with_params(params).unwrap();
  let mut tree = [0u8; 32];
  h.compute(b"", &mut tree).unwrap();

  assert_ne!(tree, Keccak256::digest(b""));

  // And it is stable across a second run.
  let mut h = Keccak256::with_params(params).unwrap();
  let mut again = [0u8; 32];
  h.compute(b"", &mut again).unwrap();
  assert_eq!(tree, again);
}

#[test]
fn remainder_bytes_change_the_last_lane_only_deterministically() {
  // Lengths that do not divide by the fan-out exercise the last-lane
  // remainder rule; the digest must still be chunking-invariant.
  let params = KeccakParams::new(256, 4, 1).unwrap();

  for len in [5usize, 139, 543, 1000] {
    let data: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();

    let mut h = Keccak256::with_params(params).unwrap();
    let mut expected = [0u8; 32];
    h.compute(&data, &mut expected).unwrap();

    let mut h = Keccak256::with_params(params).unwrap();
    for chunk in data.chunks(3) {
      h.update(chunk).unwrap();
    }
    let mut out = [0u8; 32];
    h.finalize_into(&mut out).unwrap();
    assert_eq!(out, expected, "len {len}");
  }
}

#[test]
fn tree_finalize_resets_for_reuse() {
  let params = KeccakParams::new(512, 2, 1).unwrap();
  let mut h = Keccak512::with_params(params).unwrap();
  let data = vec![0x33u8; 4096];

  let mut first = [0u8; 64];
  h.compute(&data, &mut first).unwrap();
  let mut second = [0u8; 64];
  h.compute(&data, &mut second).unwrap();
  assert_eq!(first, second);
}

#[test]
fn tree_short_output_fails_before_consuming_state() {
  let params = KeccakParams::new(256, 2, 1).unwrap();
  let mut h = Keccak256::with_params(params).unwrap();
  h.update(b"partial").unwrap();

  let mut short = [0u8; 16];
  assert_eq!(
    h.finalize_into(&mut short),
    Err(DigestError::ShortBuffer { required: 32, actual: 16 })
  );

  let mut out = [0u8; 32];
  h.finalize_into(&mut out).unwrap();

  let mut fresh = Keccak256::with_params(params).unwrap();
  let mut expected = [0u8; 32];
  fresh.compute(b"partial", &mut expected).unwrap();
  assert_eq!(out, expected);
}

#[test]
fn params_must_match_the_digest_width() {
  let params = KeccakParams::new(512, 2, 1).unwrap();
  assert_eq!(
    Keccak256::with_params(params).unwrap_err(),
    DigestError::InvalidParameter("params output size does not match digest width")
  );
}

#[test]
fn profile_reports_tree_geometry() {
  let params = KeccakParams::new(256, 4, 2).unwrap();
  let h = Keccak256::with_params(params).unwrap();

  let profile = h.parallel_profile();
  assert!(h.is_parallel());
  assert_eq!(profile.fan_out(), 4);
  assert_eq!(profile.parallel_minimum_size(), 4 * 136);
  assert_eq!(profile.parallel_block_size(), 4 * 136 * 2);
  assert_eq!(h.parallel_block_size() % profile.parallel_minimum_size(), 0);
}

#[test]
fn keccak512_tree_mode_works_at_its_own_rate() {
  let data = vec![0x61u8; 1 << 20];

  let params = KeccakParams::new(512, 2, 4).unwrap();
  let mut h = Keccak512::with_params(params).unwrap();
  let mut tree = [0u8; 64];
  h.compute(&data, &mut tree).unwrap();

  let mut again = Keccak512::with_params(params).unwrap();
  let mut second = [0u8; 64];
  again.compute(&data, &mut second).unwrap();
  assert_eq!(tree, second);
  assert_ne!(tree, Keccak512::digest(&data));
}
