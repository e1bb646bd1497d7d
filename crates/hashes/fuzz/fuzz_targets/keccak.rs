#![no_main]

use hashes::crypto::{Keccak256, Keccak512, KeccakParams};
use libfuzzer_sys::fuzz_target;
use traits::Digest as _;

fn split_point(input: &[u8]) -> usize {
  if input.is_empty() {
    return 0;
  }
  (input[0] as usize) % (input.len() + 1)
}

fuzz_target!(|input: &[u8]| {
  let split = split_point(input);
  let (a, b) = input.split_at(split);

  // Sequential vs sha3-crate oracle, one-shot and streaming.
  {
    let ours = Keccak256::digest(input);

    let mut h = Keccak256::new(false);
    h.update(a).unwrap();
    h.update(b).unwrap();
    let mut streamed = [0u8; 32];
    h.finalize_into(&mut streamed).unwrap();
    assert_eq!(ours, streamed);

    use sha3::Digest as _;
    let reference = sha3::Keccak256::digest(input);
    assert_eq!(&ours[..], &reference[..]);
  }

  {
    let ours = Keccak512::digest(input);

    use sha3::Digest as _;
    let reference = sha3::Keccak512::digest(input);
    assert_eq!(&ours[..], &reference[..]);
  }

  // Tree mode: one-shot must equal split streaming.
  {
    let params = KeccakParams::new(256, 2, 1).unwrap();
    let mut one_shot = Keccak256::with_params(params).unwrap();
    let mut expected = [0u8; 32];
    one_shot.compute(input, &mut expected).unwrap();

    let mut h = Keccak256::with_params(params).unwrap();
    h.update(a).unwrap();
    h.update(b).unwrap();
    let mut streamed = [0u8; 32];
    h.finalize_into(&mut streamed).unwrap();
    assert_eq!(expected, streamed);
  }
});
