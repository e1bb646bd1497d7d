//! Error types for digest operations.
//!
//! One typed error covers the whole surface; nothing is retried internally
//! and no intermediate hash state leaks through error values.

use core::fmt;

/// Error raised by digest operations and the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DigestError {
  /// The algorithm tag is not a concrete digest.
  UnknownAlgorithm,
  /// An output buffer cannot hold the bytes the operation must write.
  ShortBuffer {
    /// Bytes the operation needs to write.
    required: usize,
    /// Bytes the caller provided.
    actual: usize,
  },
  /// A configuration value is out of range; the payload names the rule.
  InvalidParameter(&'static str),
  /// The instance was destroyed and can no longer be used.
  InvalidState,
}

impl fmt::Display for DigestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownAlgorithm => f.write_str("unknown digest algorithm"),
      Self::ShortBuffer { required, actual } => {
        write!(f, "buffer too short: required {required} bytes, got {actual}")
      }
      Self::InvalidParameter(reason) => write!(f, "invalid parameter: {reason}"),
      Self::InvalidState => f.write_str("instance has been destroyed"),
    }
  }
}

impl core::error::Error for DigestError {}
