//! Per-instance parallel hashing profile.

use crate::DigestError;

/// Tree-hashing profile: lane count and dispatch block sizes.
///
/// The profile is part of the digest configuration: the fan-out and the
/// parallel block size both shape the tree, so changing either changes the
/// digest of every input. `simd_detected` is informational only.
///
/// All sizes are deterministic functions of the configuration, never of the
/// host, so a given configuration hashes identically on every machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelOptions {
  fan_out: usize,
  block_size: usize,
  parallel_block_size: usize,
  simd_detected: bool,
}

impl ParallelOptions {
  /// Profile for the single-lane sequential engine.
  #[must_use]
  pub fn sequential(block_size: usize) -> Self {
    debug_assert!(block_size > 0);
    Self {
      fan_out: 1,
      block_size,
      parallel_block_size: block_size,
      simd_detected: platform::simd_detected(),
    }
  }

  /// Build a profile for `fan_out` lanes over rate blocks of `block_size`
  /// bytes, dispatching `leaf_blocks` rate blocks per lane per parallel
  /// block.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] when `fan_out` is zero or odd (and
  /// not 1), or when `block_size` or `leaf_blocks` is zero.
  pub fn new(block_size: usize, fan_out: usize, leaf_blocks: usize) -> Result<Self, DigestError> {
    if block_size == 0 {
      return Err(DigestError::InvalidParameter("block size must be nonzero"));
    }
    if leaf_blocks == 0 {
      return Err(DigestError::InvalidParameter("leaf block count must be nonzero"));
    }
    match fan_out {
      0 => return Err(DigestError::InvalidParameter("fan-out must be nonzero")),
      1 => return Ok(Self::sequential(block_size)),
      n if n % 2 != 0 => return Err(DigestError::InvalidParameter("fan-out must be even")),
      _ => {}
    }

    Ok(Self {
      fan_out,
      block_size,
      parallel_block_size: fan_out * block_size * leaf_blocks,
      simd_detected: platform::simd_detected(),
    })
  }

  /// Number of parallel lanes (1 in sequential mode).
  #[inline]
  #[must_use]
  pub const fn fan_out(&self) -> usize {
    self.fan_out
  }

  /// Sponge rate in bytes.
  #[inline]
  #[must_use]
  pub const fn block_size(&self) -> usize {
    self.block_size
  }

  /// Bytes consumed by one fork/join dispatch.
  #[inline]
  #[must_use]
  pub const fn parallel_block_size(&self) -> usize {
    self.parallel_block_size
  }

  /// Smallest legal parallel block: one rate block per lane.
  #[inline]
  #[must_use]
  pub const fn parallel_minimum_size(&self) -> usize {
    self.fan_out * self.block_size
  }

  /// Whether this profile drives the multi-lane tree engine.
  #[inline]
  #[must_use]
  pub const fn is_parallel(&self) -> bool {
    self.fan_out > 1
  }

  /// Whether a wide SIMD unit was detected on this host (informational).
  #[inline]
  #[must_use]
  pub const fn simd_detected(&self) -> bool {
    self.simd_detected
  }

  /// Rate blocks each lane absorbs per parallel block.
  #[inline]
  #[must_use]
  pub const fn leaf_blocks(&self) -> usize {
    self.parallel_block_size / self.parallel_minimum_size()
  }

  /// Change the lane count, recomputing the parallel block size with the
  /// current per-lane depth.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] when `degree` is zero, odd, or larger
  /// than the detected core count (when the count is known).
  pub fn set_max_degree(&mut self, degree: usize) -> Result<(), DigestError> {
    if degree == 0 {
      return Err(DigestError::InvalidParameter("parallel degree must be nonzero"));
    }
    if degree % 2 != 0 {
      return Err(DigestError::InvalidParameter("parallel degree must be even"));
    }
    let cores = platform::logical_cores();
    if cores != 0 && degree > cores {
      return Err(DigestError::InvalidParameter(
        "parallel degree exceeds detected core count",
      ));
    }

    let leaf_blocks = self.leaf_blocks();
    self.fan_out = degree;
    self.parallel_block_size = degree * self.block_size * leaf_blocks;
    Ok(())
  }

  /// Override the parallel block size.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] unless `size` is a positive multiple
  /// of [`parallel_minimum_size`](Self::parallel_minimum_size).
  pub fn set_parallel_block_size(&mut self, size: usize) -> Result<(), DigestError> {
    let min = self.parallel_minimum_size();
    if size == 0 || size % min != 0 {
      return Err(DigestError::InvalidParameter(
        "parallel block size must be a positive multiple of the minimum size",
      ));
    }
    self.parallel_block_size = size;
    Ok(())
  }
}
