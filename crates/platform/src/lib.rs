//! CPU detection for the keccak-tree workspace.
//!
//! This crate is the single source of truth for the two machine facts the
//! parallel profile consumes:
//!
//! - [`logical_cores`]: how many worker lanes the host can usefully run
//! - [`simd_detected`]: whether wide vector units are present (informational;
//!   it never changes hash output)
//!
//! # Caching
//!
//! - With `std`: results are cached in a `OnceLock` (one-time detection).
//! - Without `std`: there is nothing to detect; [`logical_cores`] reports 0
//!   ("unknown") and [`simd_detected`] falls back to compile-time features.
//!
//! # Example
//!
//! ```
//! let info = platform::get();
//! assert_eq!(info.logical_cores, platform::logical_cores());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Detected host facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuInfo {
  /// Logical core count, or 0 when detection is unavailable.
  pub logical_cores: usize,
  /// Whether a wide SIMD unit (AVX2 / NEON class) is available.
  pub simd: bool,
}

impl CpuInfo {
  #[cfg(not(feature = "std"))]
  const fn portable() -> Self {
    Self {
      logical_cores: 0,
      simd: compile_time_simd(),
    }
  }
}

/// Get detected host facts.
///
/// With `std` the detection runs once and is cached; without `std` this is a
/// compile-time constant.
#[inline]
#[must_use]
pub fn get() -> CpuInfo {
  #[cfg(feature = "std")]
  {
    static CACHE: std::sync::OnceLock<CpuInfo> = std::sync::OnceLock::new();
    *CACHE.get_or_init(detect)
  }
  #[cfg(not(feature = "std"))]
  {
    CpuInfo::portable()
  }
}

/// Logical core count, or 0 when detection is unavailable.
///
/// Callers treat 0 as "unknown": upper-bound validation against the core
/// count is skipped rather than failing closed.
#[inline]
#[must_use]
pub fn logical_cores() -> usize {
  get().logical_cores
}

/// Whether a wide SIMD unit is available on this host.
#[inline]
#[must_use]
pub fn simd_detected() -> bool {
  get().simd
}

#[cfg(any(not(feature = "std"), not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
const fn compile_time_simd() -> bool {
  cfg!(any(
    target_feature = "avx2",
    all(target_arch = "aarch64", target_feature = "neon")
  ))
}

#[cfg(feature = "std")]
fn detect() -> CpuInfo {
  let logical_cores = std::thread::available_parallelism().map_or(0, std::num::NonZero::get);

  #[cfg(target_arch = "x86_64")]
  let simd = std::arch::is_x86_feature_detected!("avx2");
  #[cfg(target_arch = "aarch64")]
  let simd = std::arch::is_aarch64_feature_detected!("neon");
  #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
  let simd = compile_time_simd();

  CpuInfo { logical_cores, simd }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn get_is_stable() {
    assert_eq!(get(), get());
  }

  #[cfg(feature = "std")]
  #[test]
  fn cores_detected_under_std() {
    // Every host this test runs on has at least one core.
    assert!(logical_cores() >= 1);
  }

  #[test]
  fn accessors_match_get() {
    let info = get();
    assert_eq!(info.logical_cores, logical_cores());
    assert_eq!(info.simd, simd_detected());
  }
}
