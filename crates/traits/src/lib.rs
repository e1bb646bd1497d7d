//! Core digest contract for the keccak-tree workspace.
//!
//! This crate provides the foundational types every implementation conforms
//! to. It is `no_std` compatible and depends only on the workspace `platform`
//! crate (for the core-count bound used by profile validation).
//!
//! # Contents
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`Digest`] | Streaming tree-digest capability set (object-safe) |
//! | [`Digests`] | Algorithm tag enum used by the registry |
//! | [`DigestError`] | Typed error for every fallible operation |
//! | [`ParallelOptions`] | Per-instance parallel profile (fan-out, block sizes) |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
mod parallel;

pub use digest::{Digest, Digests};
pub use error::DigestError;
pub use parallel::ParallelOptions;
