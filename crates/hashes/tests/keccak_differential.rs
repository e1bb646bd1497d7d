//! Differential tests against the `sha3` crate's legacy Keccak oracles
//! (same round-3 `0x01` padding).

use hashes::{
  Digest as _,
  crypto::{Keccak256, Keccak512},
};
use proptest::prelude::*;

fn keccak256_ref(data: &[u8]) -> [u8; 32] {
  use sha3::Digest as _;
  let out = sha3::Keccak256::digest(data);
  let mut bytes = [0u8; 32];
  bytes.copy_from_slice(&out);
  bytes
}

fn keccak512_ref(data: &[u8]) -> [u8; 64] {
  use sha3::Digest as _;
  let out = sha3::Keccak512::digest(data);
  let mut bytes = [0u8; 64];
  bytes.copy_from_slice(&out);
  bytes
}

proptest! {
  #[test]
  fn keccak256_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(Keccak256::digest(&data), keccak256_ref(&data));
  }

  #[test]
  fn keccak512_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    prop_assert_eq!(Keccak512::digest(&data), keccak512_ref(&data));
  }

  #[test]
  fn keccak256_streaming_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let expected = keccak256_ref(&data);

    let mut h = Keccak256::new(false);
    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      h.update(&data[i..end]).unwrap();
      i = end;
    }

    let mut out = [0u8; 32];
    h.finalize_into(&mut out).unwrap();
    prop_assert_eq!(out, expected);
  }

  #[test]
  fn keccak512_streaming_matches_sha3_crate(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let expected = keccak512_ref(&data);

    let mut h = Keccak512::new(false);
    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      h.update(&data[i..end]).unwrap();
      i = end;
    }

    let mut out = [0u8; 64];
    h.finalize_into(&mut out).unwrap();
    prop_assert_eq!(out, expected);
  }

  #[test]
  fn parallel_chunking_is_invariant(
    data in proptest::collection::vec(any::<u8>(), 0..8192),
    split in any::<usize>(),
  ) {
    use hashes::crypto::KeccakParams;

    let params = KeccakParams::new(256, 2, 1).unwrap();

    let mut one_shot = Keccak256::with_params(params).unwrap();
    let mut expected = [0u8; 32];
    one_shot.compute(&data, &mut expected).unwrap();

    let split = split % (data.len() + 1);
    let (a, b) = data.split_at(split);
    let mut h = Keccak256::with_params(params).unwrap();
    h.update(a).unwrap();
    h.update(b).unwrap();
    let mut out = [0u8; 32];
    h.finalize_into(&mut out).unwrap();
    prop_assert_eq!(out, expected);
  }
}
