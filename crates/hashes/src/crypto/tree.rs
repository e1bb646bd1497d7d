//! Streaming tree-hash driver and the two digest widths.
//!
//! The driver buffers caller bytes into one parallel block, stripes each
//! full block across the leaf lanes (fork/join), and at finalization folds
//! the leaf digests into a root lane in ascending lane order. In sequential
//! mode there is a single lane and the "parallel block" is one rate block.

#![allow(clippy::indexing_slicing)] // Stripe arithmetic is bounds-audited against the buffer length

use alloc::{vec, vec::Vec};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use traits::{Digest, DigestError, Digests, ParallelOptions};
use zeroize::Zeroize;

use super::{keccak::KeccakState, params::KeccakParams};

/// Default lane count for `new(parallel = true)`. Part of the output
/// contract: a different fan-out is a different hash function.
const DEF_FAN_OUT: usize = 8;

/// Default rate blocks per lane per parallel block. Constant, never derived
/// from the host, so a configuration hashes identically everywhere.
const DEF_LEAF_BLOCKS: usize = 4;

#[derive(Clone, Debug)]
struct KeccakTree<const RATE: usize, const OUT: usize> {
  params: KeccakParams,
  profile: ParallelOptions,
  lanes: Vec<KeccakState<RATE>>,
  buffer: Vec<u8>,
  msg_len: usize,
  destroyed: bool,
}

impl<const RATE: usize, const OUT: usize> KeccakTree<RATE, OUT> {
  fn new(parallel: bool) -> Self {
    if parallel {
      let params = KeccakParams::preset((OUT * 8) as u16, DEF_FAN_OUT as u8, DEF_LEAF_BLOCKS as u8);
      let Ok(profile) = ParallelOptions::new(RATE, DEF_FAN_OUT, DEF_LEAF_BLOCKS) else {
        unreachable!("default parallel profile is valid")
      };
      Self::with_config(params, profile)
    } else {
      let params = KeccakParams::preset((OUT * 8) as u16, 1, 1);
      Self::with_config(params, ParallelOptions::sequential(RATE))
    }
  }

  fn with_params(params: KeccakParams) -> Result<Self, DigestError> {
    if params.output_size() as usize != OUT * 8 {
      return Err(DigestError::InvalidParameter(
        "params output size does not match digest width",
      ));
    }
    let profile = ParallelOptions::new(RATE, params.fan_out(), params.leaf_size())?;
    Ok(Self::with_config(params, profile))
  }

  fn with_config(params: KeccakParams, profile: ParallelOptions) -> Self {
    let mut tree = Self {
      params,
      lanes: vec![KeccakState::default(); profile.fan_out()],
      buffer: vec![0u8; profile.parallel_block_size()],
      profile,
      msg_len: 0,
      destroyed: false,
    };
    tree.reset_lanes();
    tree
  }

  const fn profile(&self) -> &ParallelOptions {
    &self.profile
  }

  const fn profile_mut(&mut self) -> &mut ParallelOptions {
    &mut self.profile
  }

  #[cfg(test)]
  fn lanes(&self) -> &[KeccakState<RATE>] {
    &self.lanes
  }

  const fn check_live(&self) -> Result<(), DigestError> {
    if self.destroyed {
      Err(DigestError::InvalidState)
    } else {
      Ok(())
    }
  }

  /// Reinitialize every lane: masked zero state, then the personalization
  /// block in parallel mode.
  fn reset_lanes(&mut self) {
    for lane in &mut self.lanes {
      lane.reset();
    }
    if self.profile.is_parallel() {
      let block = self.params.to_block::<RATE>();
      for lane in &mut self.lanes {
        lane.absorb_blocks(&block);
      }
    }
    self.msg_len = 0;
  }

  fn update(&mut self, data: &[u8]) -> Result<(), DigestError> {
    self.check_live()?;
    self.absorb(data);
    Ok(())
  }

  fn absorb(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    let pbs = self.buffer.len();
    if self.msg_len != 0 {
      let take = core::cmp::min(pbs - self.msg_len, data.len());
      self.buffer[self.msg_len..self.msg_len + take].copy_from_slice(&data[..take]);
      self.msg_len += take;
      data = &data[take..];

      if self.msg_len == pbs {
        Self::process_block(&mut self.lanes, &self.profile, &self.buffer);
        self.msg_len = 0;
      }
    }

    let mut blocks = data.chunks_exact(pbs);
    for block in blocks.by_ref() {
      Self::process_block(&mut self.lanes, &self.profile, block);
    }

    let rest = blocks.remainder();
    if !rest.is_empty() {
      self.buffer[..rest.len()].copy_from_slice(rest);
      self.msg_len = rest.len();
    }
  }

  /// Dispatch one full parallel block: lane `i` absorbs stripe `i`.
  fn process_block(lanes: &mut [KeccakState<RATE>], profile: &ParallelOptions, input: &[u8]) {
    debug_assert_eq!(input.len(), profile.parallel_block_size());

    if !profile.is_parallel() {
      let lane = &mut lanes[0];
      lane.absorb_blocks(input);
      lane.increase(input.len() as u64);
      return;
    }

    let stripe = input.len() / lanes.len();
    let absorb = |(index, lane): (usize, &mut KeccakState<RATE>)| {
      lane.absorb_blocks(&input[index * stripe..(index + 1) * stripe]);
      lane.increase(stripe as u64);
    };

    #[cfg(feature = "parallel")]
    lanes.par_iter_mut().enumerate().for_each(absorb);
    #[cfg(not(feature = "parallel"))]
    lanes.iter_mut().enumerate().for_each(absorb);
  }

  fn finalize_into(&mut self, output: &mut [u8]) -> Result<usize, DigestError> {
    self.check_live()?;
    if output.len() < OUT {
      return Err(DigestError::ShortBuffer {
        required: OUT,
        actual: output.len(),
      });
    }
    self.finish(&mut output[..OUT]);
    Ok(OUT)
  }

  /// Finalize into `out` (exactly `OUT` bytes) and reset for reuse.
  fn finish(&mut self, out: &mut [u8]) {
    debug_assert_eq!(out.len(), OUT);

    if self.profile.is_parallel() {
      let fan_out = self.lanes.len();
      let tail = &self.buffer[..self.msg_len];
      let stripe = tail.len() / fan_out;
      let mut codes = vec![0u8; fan_out * OUT];

      // Leaf fold: lane i owns [i*stripe, (i+1)*stripe), remainder bytes
      // extend the last lane.
      let fold = |(index, (lane, code)): (usize, (&mut KeccakState<RATE>, &mut [u8]))| {
        let start = index * stripe;
        let end = if index == fan_out - 1 { tail.len() } else { start + stripe };
        lane.increase((end - start) as u64);
        lane.finalize_into(&tail[start..end], code);
      };

      #[cfg(feature = "parallel")]
      self
        .lanes
        .par_iter_mut()
        .zip(codes.par_chunks_exact_mut(OUT))
        .enumerate()
        .for_each(fold);
      #[cfg(not(feature = "parallel"))]
      self.lanes.iter_mut().zip(codes.chunks_exact_mut(OUT)).enumerate().for_each(fold);

      // Root fold: a plain sequential-style lane absorbs the leaf digests
      // in ascending lane order.
      let mut root = KeccakState::<RATE>::default();
      root.finalize_into(&codes, out);
    } else {
      let lane = &mut self.lanes[0];
      lane.increase(self.msg_len as u64);
      lane.finalize_into(&self.buffer[..self.msg_len], out);
    }

    self.reset_lanes();
  }

  fn parallel_max_degree(&mut self, degree: usize) -> Result<(), DigestError> {
    self.check_live()?;

    // Validate into copies first so a rejected degree leaves this instance
    // untouched.
    let mut profile = self.profile.clone();
    if !profile.is_parallel() {
      // Converting from sequential: adopt the default per-lane depth so the
      // result matches `new(parallel = true)` at the same degree.
      profile.set_parallel_block_size(RATE * DEF_LEAF_BLOCKS)?;
    }
    profile.set_max_degree(degree)?;
    let params = KeccakParams::new((OUT * 8) as u16, degree, profile.leaf_blocks())?;

    self.profile = profile;
    self.params = params;
    self.lanes = vec![KeccakState::default(); degree];
    self.buffer = vec![0u8; self.profile.parallel_block_size()];
    self.reset_lanes();
    Ok(())
  }

  fn reset(&mut self) -> Result<(), DigestError> {
    self.check_live()?;
    self.reset_lanes();
    Ok(())
  }

  fn destroy(&mut self) {
    if self.destroyed {
      return;
    }
    for lane in &mut self.lanes {
      lane.zeroize();
    }
    self.buffer.zeroize();
    self.msg_len = 0;
    self.destroyed = true;
  }
}

impl<const RATE: usize, const OUT: usize> Drop for KeccakTree<RATE, OUT> {
  fn drop(&mut self) {
    self.destroy();
  }
}

const KECCAK256_RATE: usize = 136;
const KECCAK256_OUT: usize = 32;
const KECCAK512_RATE: usize = 72;
const KECCAK512_OUT: usize = 64;

/// Keccak-256 (round-3 submission padding).
///
/// `new(false)` is the plain streaming digest; `new(true)` is the
/// tree-parallel engine with the default fan-out of 8.
#[derive(Clone, Debug)]
pub struct Keccak256 {
  tree: KeccakTree<KECCAK256_RATE, KECCAK256_OUT>,
}

impl Keccak256 {
  /// Sponge rate in bytes.
  pub const BLOCK_SIZE: usize = KECCAK256_RATE;
  /// Digest size in bytes.
  pub const DIGEST_SIZE: usize = KECCAK256_OUT;

  /// Create a sequential (`parallel = false`) or tree-parallel instance.
  #[must_use]
  pub fn new(parallel: bool) -> Self {
    Self {
      tree: KeccakTree::new(parallel),
    }
  }

  /// Create an instance from an explicit tree configuration.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] when the params fail validation or
  /// name a different output size.
  pub fn with_params(params: KeccakParams) -> Result<Self, DigestError> {
    Ok(Self {
      tree: KeccakTree::with_params(params)?,
    })
  }

  /// One-shot sequential digest.
  #[must_use]
  pub fn digest(data: &[u8]) -> [u8; Self::DIGEST_SIZE] {
    let mut hasher = Self::new(false);
    let mut out = [0u8; Self::DIGEST_SIZE];
    hasher.tree.absorb(data);
    hasher.tree.finish(&mut out);
    out
  }
}

impl Default for Keccak256 {
  fn default() -> Self {
    Self::new(false)
  }
}

impl Digest for Keccak256 {
  fn name(&self) -> &'static str {
    "Keccak256"
  }

  fn enumeral(&self) -> Digests {
    Digests::Keccak256
  }

  fn block_size(&self) -> usize {
    Self::BLOCK_SIZE
  }

  fn digest_size(&self) -> usize {
    Self::DIGEST_SIZE
  }

  fn is_parallel(&self) -> bool {
    self.tree.profile().is_parallel()
  }

  fn parallel_block_size(&self) -> usize {
    self.tree.profile().parallel_block_size()
  }

  fn parallel_profile(&self) -> &ParallelOptions {
    self.tree.profile()
  }

  fn parallel_profile_mut(&mut self) -> &mut ParallelOptions {
    self.tree.profile_mut()
  }

  fn update(&mut self, input: &[u8]) -> Result<(), DigestError> {
    self.tree.update(input)
  }

  fn finalize_into(&mut self, output: &mut [u8]) -> Result<usize, DigestError> {
    self.tree.finalize_into(output)
  }

  fn parallel_max_degree(&mut self, degree: usize) -> Result<(), DigestError> {
    self.tree.parallel_max_degree(degree)
  }

  fn reset(&mut self) -> Result<(), DigestError> {
    self.tree.reset()
  }

  fn destroy(&mut self) {
    self.tree.destroy();
  }
}

/// Keccak-512 (round-3 submission padding).
///
/// Same engine as [`Keccak256`] at rate 72 with a 64-byte digest.
#[derive(Clone)]
pub struct Keccak512 {
  tree: KeccakTree<KECCAK512_RATE, KECCAK512_OUT>,
}

impl Keccak512 {
  /// Sponge rate in bytes.
  pub const BLOCK_SIZE: usize = KECCAK512_RATE;
  /// Digest size in bytes.
  pub const DIGEST_SIZE: usize = KECCAK512_OUT;

  /// Create a sequential (`parallel = false`) or tree-parallel instance.
  #[must_use]
  pub fn new(parallel: bool) -> Self {
    Self {
      tree: KeccakTree::new(parallel),
    }
  }

  /// Create an instance from an explicit tree configuration.
  ///
  /// # Errors
  ///
  /// [`DigestError::InvalidParameter`] when the params fail validation or
  /// name a different output size.
  pub fn with_params(params: KeccakParams) -> Result<Self, DigestError> {
    Ok(Self {
      tree: KeccakTree::with_params(params)?,
    })
  }

  /// One-shot sequential digest.
  #[must_use]
  pub fn digest(data: &[u8]) -> [u8; Self::DIGEST_SIZE] {
    let mut hasher = Self::new(false);
    let mut out = [0u8; Self::DIGEST_SIZE];
    hasher.tree.absorb(data);
    hasher.tree.finish(&mut out);
    out
  }
}

impl Default for Keccak512 {
  fn default() -> Self {
    Self::new(false)
  }
}

impl Digest for Keccak512 {
  fn name(&self) -> &'static str {
    "Keccak512"
  }

  fn enumeral(&self) -> Digests {
    Digests::Keccak512
  }

  fn block_size(&self) -> usize {
    Self::BLOCK_SIZE
  }

  fn digest_size(&self) -> usize {
    Self::DIGEST_SIZE
  }

  fn is_parallel(&self) -> bool {
    self.tree.profile().is_parallel()
  }

  fn parallel_block_size(&self) -> usize {
    self.tree.profile().parallel_block_size()
  }

  fn parallel_profile(&self) -> &ParallelOptions {
    self.tree.profile()
  }

  fn parallel_profile_mut(&mut self) -> &mut ParallelOptions {
    self.tree.profile_mut()
  }

  fn update(&mut self, input: &[u8]) -> Result<(), DigestError> {
    self.tree.update(input)
  }

  fn finalize_into(&mut self, output: &mut [u8]) -> Result<usize, DigestError> {
    self.tree.finalize_into(output)
  }

  fn parallel_max_degree(&mut self, degree: usize) -> Result<(), DigestError> {
    self.tree.parallel_max_degree(degree)
  }

  fn reset(&mut self) -> Result<(), DigestError> {
    self.tree.reset()
  }

  fn destroy(&mut self) {
    self.tree.destroy();
  }
}
