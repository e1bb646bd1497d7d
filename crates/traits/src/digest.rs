//! Streaming digest contract.
//!
//! The trait is object-safe on purpose: the registry hands out boxed
//! instances selected by an algorithm tag at runtime.

use crate::{DigestError, ParallelOptions};

/// Algorithm tags understood by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Digests {
  /// No algorithm selected.
  #[default]
  None,
  /// Keccak with a 256-bit digest (rate 136 bytes).
  Keccak256,
  /// Keccak with a 512-bit digest (rate 72 bytes).
  Keccak512,
}

impl Digests {
  /// Stable lowercase name for diagnostics.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::None => "none",
      Self::Keccak256 => "keccak256",
      Self::Keccak512 => "keccak512",
    }
  }
}

/// Streaming message digest with optional tree-parallel hashing.
///
/// Implementations guarantee that any chunking of the same input through
/// [`update`](Self::update) produces the same digest as a single
/// [`compute`](Self::compute) call, and that
/// [`finalize_into`](Self::finalize_into) resets the instance for reuse.
///
/// A single instance is not reentrant; callers serialize access. After
/// [`destroy`](Self::destroy), every fallible operation reports
/// [`DigestError::InvalidState`].
pub trait Digest {
  /// Implementation name, e.g. `"Keccak256"`.
  fn name(&self) -> &'static str;

  /// Algorithm tag of this instance.
  fn enumeral(&self) -> Digests;

  /// Sponge rate in bytes (136 or 72).
  fn block_size(&self) -> usize;

  /// Digest size in bytes (32 or 64).
  fn digest_size(&self) -> usize;

  /// Whether this instance hashes with the parallel tree engine.
  fn is_parallel(&self) -> bool;

  /// Input granule that triggers one fork/join dispatch, in bytes.
  fn parallel_block_size(&self) -> usize;

  /// The instance's parallel profile.
  fn parallel_profile(&self) -> &ParallelOptions;

  /// Mutable view of the parallel profile.
  ///
  /// Mutating the profile while a hash computation is in flight is not
  /// supported; use [`parallel_max_degree`](Self::parallel_max_degree) to
  /// change the lane count and reinitialize in one step.
  fn parallel_profile_mut(&mut self) -> &mut ParallelOptions;

  /// Update the digest with a single byte.
  fn update_byte(&mut self, input: u8) -> Result<(), DigestError> {
    self.update(&[input])
  }

  /// Update the digest with a byte slice.
  fn update(&mut self, input: &[u8]) -> Result<(), DigestError>;

  /// One-shot hash: update with `input`, then finalize into `output`.
  ///
  /// The output length is checked before any state changes, so a short
  /// buffer leaves the instance exactly as it was.
  fn compute(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, DigestError> {
    let required = self.digest_size();
    if output.len() < required {
      return Err(DigestError::ShortBuffer {
        required,
        actual: output.len(),
      });
    }
    self.update(input)?;
    self.finalize_into(output)
  }

  /// Finalize the digest into the start of `output`, returning the number of
  /// bytes written (always [`digest_size`](Self::digest_size)).
  ///
  /// The instance is reset before returning and can be reused. To write at
  /// an offset, pass a subslice (`&mut output[offset..]`).
  fn finalize_into(&mut self, output: &mut [u8]) -> Result<usize, DigestError>;

  /// Change the tree fan-out to `degree` and reinitialize the state.
  ///
  /// `degree` must be even, at least 2, and no larger than the detected
  /// core count. Changing the fan-out changes the digest of every input.
  fn parallel_max_degree(&mut self, degree: usize) -> Result<(), DigestError>;

  /// Reset the instance to its initial (possibly personalized) state.
  fn reset(&mut self) -> Result<(), DigestError>;

  /// Zeroize all internal state and retire the instance.
  ///
  /// Idempotent; all later operations fail with
  /// [`DigestError::InvalidState`].
  fn destroy(&mut self);
}
