//! Error types for the PBIL engine.
//!
//! Failures split into three families, each detected before the generation
//! loop starts:
//! - [`ConfigError`]: a recognized run option outside its valid domain.
//! - [`ProblemError`]: a malformed problem model (literal `0`, variable index
//!   out of range, empty instance).
//! - [`DimacsError`]: unreadable or unparsable DIMACS CNF input.
//!
//! Numeric drift of probability values during learning and mutation is *not*
//! represented here: it is recovered locally by clamping and only surfaces as
//! a counter on the run result.

use thiserror::Error;

/// A run option outside its valid domain.
///
/// Detected by [`PbilConfig::validate`](crate::pbil::config::PbilConfig::validate)
/// before any generation runs; never retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Population size must allow at least one individual per generation.
    #[error("population size must be at least 1, got {0}")]
    PopulationSize(usize),

    /// Learning rate outside `[0, 1]`.
    #[error("learning rate must lie in [0, 1], got {0}")]
    LearningRate(f64),

    /// Negative learning rate outside `[0, 1]`.
    #[error("negative learning rate must lie in [0, 1], got {0}")]
    NegativeLearningRate(f64),

    /// Per-bit mutation trigger probability outside `[0, 1]`.
    #[error("mutation probability must lie in [0, 1], got {0}")]
    MutationProbability(f64),

    /// Mutation shift must be a non-negative magnitude.
    #[error("mutation shift must be non-negative, got {0}")]
    MutationShift(f64),

    /// The generation ceiling must allow at least one generation.
    #[error("max generations must be at least 1, got {0}")]
    MaxGenerations(usize),
}

/// A problem model invariant violation, detected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// A problem must have at least one variable.
    #[error("problem has no variables")]
    NoVariables,

    /// A problem must have at least one clause.
    #[error("problem has no clauses")]
    NoClauses,

    /// `0` is the DIMACS clause terminator, never a literal.
    #[error("clause {clause} contains literal 0")]
    ZeroLiteral {
        /// Zero-based index of the offending clause.
        clause: usize,
    },

    /// A literal referenced a variable outside `[1, num_vars]`.
    #[error("clause {clause} references variable {literal} outside [1, {num_vars}]")]
    VariableOutOfRange {
        /// Zero-based index of the offending clause.
        clause: usize,
        /// The offending literal as parsed.
        literal: i32,
        /// Declared variable count of the problem.
        num_vars: usize,
    },

    /// Random instance generation asked for clauses longer than the variable
    /// count allows (literals within one clause use distinct variables).
    #[error("clause length {requested} exceeds variable count {num_vars}")]
    ClauseLength {
        /// Requested literals per clause.
        requested: usize,
        /// Available variable count.
        num_vars: usize,
    },
}

/// A failure while reading DIMACS CNF input.
#[derive(Debug, Error)]
pub enum DimacsError {
    /// Underlying I/O failure.
    #[error("failed to read DIMACS input: {0}")]
    Io(#[from] std::io::Error),

    /// A `p cnf` problem line that could not be parsed.
    #[error("line {line}: malformed problem line '{content}'")]
    InvalidHeader {
        /// One-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A clause token that is not a signed integer.
    #[error("line {line}: invalid literal token '{token}'")]
    InvalidLiteral {
        /// One-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The parsed clauses violate the problem model invariants.
    #[error(transparent)]
    Problem(#[from] ProblemError),
}

/// Top-level error for callers that mix configuration, parsing, and
/// construction (the CLI, primarily).
#[derive(Debug, Error)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`ProblemError`].
    #[error(transparent)]
    Problem(#[from] ProblemError),

    /// See [`DimacsError`].
    #[error(transparent)]
    Dimacs(#[from] DimacsError),

    /// Filesystem-level failure outside DIMACS parsing proper.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::PopulationSize(0);
        assert_eq!(err.to_string(), "population size must be at least 1, got 0");
    }

    #[test]
    fn test_problem_error_display() {
        let err = ProblemError::VariableOutOfRange {
            clause: 2,
            literal: -9,
            num_vars: 5,
        };
        assert_eq!(
            err.to_string(),
            "clause 2 references variable -9 outside [1, 5]"
        );
    }

    #[test]
    fn test_dimacs_error_wraps_problem_error() {
        let err = DimacsError::from(ProblemError::NoClauses);
        assert_eq!(err.to_string(), "problem has no clauses");
    }
}
