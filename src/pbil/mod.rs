#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

/// Run configuration and its validation.
pub mod config;
/// DIMACS CNF reading and writing.
pub mod dimacs;
/// Error types for configuration, problem construction, and parsing.
pub mod error;
/// Fitness evaluation of individuals against a problem.
pub mod fitness;
/// The probability vector update rule.
pub mod learning;
/// Stochastic perturbation of the probability vector.
pub mod mutation;
/// Individuals and population sampling.
pub mod population;
/// The probability vector type.
pub mod probability;
/// The immutable MAXSAT problem model.
pub mod problem;
/// The generation loop, snapshots, and terminal results.
pub mod runner;
/// Best and worst selection over an evaluated population.
pub mod selection;
