//! Runtime lookup from algorithm tag to digest instance and sizes.
//!
//! Size lookups are total over [`Digests`]; only [`get_instance`] can fail,
//! and only for [`Digests::None`].

use hashes::crypto::{Keccak256, Keccak512};
use traits::{Digest, DigestError, Digests};

/// Instantiate the digest selected by `tag`.
///
/// # Errors
///
/// [`DigestError::UnknownAlgorithm`] for [`Digests::None`].
pub fn get_instance(tag: Digests, parallel: bool) -> Result<Box<dyn Digest>, DigestError> {
  match tag {
    Digests::Keccak256 => Ok(Box::new(Keccak256::new(parallel))),
    Digests::Keccak512 => Ok(Box::new(Keccak512::new(parallel))),
    Digests::None => Err(DigestError::UnknownAlgorithm),
  }
}

/// Sponge rate in bytes, or 0 for [`Digests::None`].
#[must_use]
pub const fn block_size(tag: Digests) -> usize {
  match tag {
    Digests::Keccak256 => Keccak256::BLOCK_SIZE,
    Digests::Keccak512 => Keccak512::BLOCK_SIZE,
    Digests::None => 0,
  }
}

/// Digest size in bytes, or 0 for [`Digests::None`].
#[must_use]
pub const fn digest_size(tag: Digests) -> usize {
  match tag {
    Digests::Keccak256 => Keccak256::DIGEST_SIZE,
    Digests::Keccak512 => Keccak512::DIGEST_SIZE,
    Digests::None => 0,
  }
}

/// Trailing padding exposed beyond the rate block: always 0, the sponge
/// absorbs its padding into the final rate block.
#[must_use]
pub const fn padding_size(tag: Digests) -> usize {
  match tag {
    Digests::Keccak256 | Digests::Keccak512 | Digests::None => 0,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sizes_match_contract() {
    assert_eq!(block_size(Digests::Keccak256), 136);
    assert_eq!(block_size(Digests::Keccak512), 72);
    assert_eq!(block_size(Digests::None), 0);

    assert_eq!(digest_size(Digests::Keccak256), 32);
    assert_eq!(digest_size(Digests::Keccak512), 64);
    assert_eq!(digest_size(Digests::None), 0);

    assert_eq!(padding_size(Digests::Keccak256), 0);
    assert_eq!(padding_size(Digests::Keccak512), 0);
  }

  #[test]
  fn none_is_not_instantiable() {
    assert!(matches!(
      get_instance(Digests::None, false),
      Err(DigestError::UnknownAlgorithm)
    ));
  }

  #[test]
  fn instances_report_their_tag() {
    for (tag, name, rate, out) in [
      (Digests::Keccak256, "Keccak256", 136, 32),
      (Digests::Keccak512, "Keccak512", 72, 64),
    ] {
      let digest = get_instance(tag, false).unwrap();
      assert_eq!(digest.enumeral(), tag);
      assert_eq!(digest.name(), name);
      assert_eq!(digest.block_size(), rate);
      assert_eq!(digest.digest_size(), out);
      assert!(!digest.is_parallel());
    }
  }

  #[test]
  fn boxed_instances_hash_through_the_trait() {
    let mut digest = get_instance(Digests::Keccak256, false).unwrap();
    let mut out = [0u8; 32];
    let written = digest.compute(b"abc", &mut out).unwrap();
    assert_eq!(written, 32);
    assert_eq!(out, Keccak256::digest(b"abc"));
  }

  #[test]
  fn parallel_flag_selects_tree_engine() {
    let digest = get_instance(Digests::Keccak512, true).unwrap();
    assert!(digest.is_parallel());
    assert_eq!(digest.parallel_profile().fan_out(), 8);
  }
}
