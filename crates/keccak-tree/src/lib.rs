//! Keccak tree-hash digests with a runtime registry.
//!
//! `keccak-tree` provides streaming Keccak-256 and Keccak-512 (round-3
//! submission padding, domain byte `0x01`) and a deterministic tree-parallel
//! mode that stripes input across a fixed lane count and folds the lane
//! digests through a root lane.
//!
//! # Quick Start
//!
//! ```
//! use keccak_tree::{Digest, Keccak256};
//!
//! // One-shot computation
//! let hash = Keccak256::digest(b"");
//! assert_eq!(
//!   hash[..4],
//!   [0xc5, 0xd2, 0x46, 0x01]
//! );
//!
//! // Streaming computation
//! let mut hasher = Keccak256::new(false);
//! hasher.update(b"ab")?;
//! hasher.update(b"c")?;
//! let mut out = [0u8; 32];
//! hasher.finalize_into(&mut out)?;
//! assert_eq!(out, Keccak256::digest(b"abc"));
//! # Ok::<(), keccak_tree::DigestError>(())
//! ```
//!
//! # Registry
//!
//! ```
//! use keccak_tree::{Digest as _, Digests, registry};
//!
//! let digest = registry::get_instance(Digests::Keccak512, false)?;
//! assert_eq!(digest.digest_size(), registry::digest_size(Digests::Keccak512));
//! # Ok::<(), keccak_tree::DigestError>(())
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `parallel` | Yes | Fork/join lane dispatch via rayon; without it the tree is walked on one thread (same output) |

pub mod registry;

pub use hashes::crypto::{Keccak256, Keccak512, KeccakParams};
pub use traits::{Digest, DigestError, Digests, ParallelOptions};
