//! Tree personalization record.
//!
//! In parallel mode every leaf lane absorbs the serialized record before any
//! message bytes, so the tree geometry is bound into the digest: two trees
//! that disagree on fan-out (or any other field) hash the same input to
//! different values.

#![allow(clippy::indexing_slicing)] // Fixed-layout header into a fixed-size block

use traits::DigestError;

/// Levels in the hash tree: one layer of leaves plus the root.
const TREE_DEPTH: u8 = 2;

/// Tree configuration absorbed as each leaf lane's first block.
///
/// # Canonical serialization
///
/// A little-endian header, zero-padded to one rate block:
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0 | 2 | output size in bits |
/// | 2 | 1 | fan-out |
/// | 3 | 1 | leaf size (rate blocks per lane per parallel block) |
/// | 4 | 1 | tree depth |
/// | 5 | 3 | reserved, zero |
///
/// Any deviation from this layout changes every parallel-mode digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeccakParams {
  output_size: u16,
  fan_out: u8,
  leaf_size: u8,
  tree_depth: u8,
}

impl KeccakParams {
  /// Build a tree configuration.
  ///
  /// `output_size` is the digest width in bits (256 or 512), `fan_out` the
  /// number of leaf lanes, and `leaf_size` the number of rate blocks each
  /// lane absorbs per parallel block.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] when the output size is not 256 or
  /// 512, when `fan_out` is zero, odd (and not 1), or over 255, or when
  /// `leaf_size` is zero or over 255.
  pub fn new(output_size: u16, fan_out: usize, leaf_size: usize) -> Result<Self, DigestError> {
    if !matches!(output_size, 256 | 512) {
      return Err(DigestError::InvalidParameter("output size must be 256 or 512 bits"));
    }
    let fan_out = match fan_out {
      0 => return Err(DigestError::InvalidParameter("fan-out must be nonzero")),
      n if n > 1 && n % 2 != 0 => return Err(DigestError::InvalidParameter("fan-out must be even")),
      n => u8::try_from(n).map_err(|_| DigestError::InvalidParameter("fan-out exceeds 255 lanes"))?,
    };
    let leaf_size = match leaf_size {
      0 => return Err(DigestError::InvalidParameter("leaf size must be nonzero")),
      n => u8::try_from(n).map_err(|_| DigestError::InvalidParameter("leaf size exceeds 255 blocks"))?,
    };

    Ok(Self {
      output_size,
      fan_out,
      leaf_size,
      tree_depth: TREE_DEPTH,
    })
  }

  /// Digest width in bits.
  #[inline]
  #[must_use]
  pub const fn output_size(&self) -> u16 {
    self.output_size
  }

  /// Number of leaf lanes.
  #[inline]
  #[must_use]
  pub const fn fan_out(&self) -> usize {
    self.fan_out as usize
  }

  /// Rate blocks per lane per parallel block.
  #[inline]
  #[must_use]
  pub const fn leaf_size(&self) -> usize {
    self.leaf_size as usize
  }

  /// Levels in the tree.
  #[inline]
  #[must_use]
  pub const fn tree_depth(&self) -> u8 {
    self.tree_depth
  }

  /// Whether this configuration selects the multi-lane engine.
  #[inline]
  #[must_use]
  pub const fn is_parallel(&self) -> bool {
    self.fan_out > 1
  }

  /// Built-in configurations with compile-time-known valid fields.
  pub(crate) const fn preset(output_size: u16, fan_out: u8, leaf_size: u8) -> Self {
    Self {
      output_size,
      fan_out,
      leaf_size,
      tree_depth: TREE_DEPTH,
    }
  }

  /// Serialize into one rate block.
  pub(crate) fn to_block<const RATE: usize>(&self) -> [u8; RATE] {
    let mut block = [0u8; RATE];
    block[..2].copy_from_slice(&self.output_size.to_le_bytes());
    block[2] = self.fan_out;
    block[3] = self.leaf_size;
    block[4] = self.tree_depth;
    block
  }
}
