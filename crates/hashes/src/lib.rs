//! Keccak tree-hash digests.
//!
//! Streaming Keccak-256 and Keccak-512 (round-3 submission padding, domain
//! byte `0x01`) with an optional deterministic tree-parallel engine: input is
//! striped across a fixed number of lanes, each lane runs the same sponge,
//! and a root lane folds the lane digests into the final value. The tree
//! geometry is part of the personalization, so changing the fan-out changes
//! the digest.
//!
//! # Modules
//!
//! - [`crypto`] - The digest implementations and their configuration types.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod crypto;

pub use traits::{Digest, DigestError, Digests, ParallelOptions};
