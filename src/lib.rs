#![warn(missing_docs)]
//! This crate implements a MAXSAT solver built on Population-Based Incremental
//! Learning (PBIL): instead of carrying an explicit population between
//! generations, the search state is a single probability vector over bit
//! values, nudged each generation toward the best sampled individual and away
//! from the worst.

/// The `pbil` module implements the optimization engine: problem model,
/// sampling, fitness evaluation, selection, learning, mutation, and the
/// generation loop that ties them together.
pub mod pbil;
