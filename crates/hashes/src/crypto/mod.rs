//! Cryptographic digest implementations.

mod keccak;
mod params;
mod tree;

pub use params::KeccakParams;
pub use tree::{Keccak256, Keccak512};
