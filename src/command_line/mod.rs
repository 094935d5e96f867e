//! Command-line interface definitions.

pub mod cli;
