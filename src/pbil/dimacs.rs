#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF file format.
//!
//! DIMACS CNF is the standard text format for boolean satisfiability
//! instances:
//! - Comment lines starting with `c`.
//! - A problem line `p cnf <num_variables> <num_clauses>`.
//! - Clause lines of space-separated signed integer literals, each line
//!   terminated by `0`.
//! - An optional `%` line marking end-of-data (common in benchmark sets).
//!
//! The parser is the front-end collaborator of the engine: it produces a
//! validated [`Problem`] and nothing downstream of it ever touches a file.
//! A clause count that disagrees with the problem line is tolerated (the
//! clauses actually present win, with a warning), matching how benchmark
//! archives are commonly mangled. A missing problem line is also tolerated;
//! the variable count is then inferred from the highest variable referenced.
//! A clause line of just `0` is kept as an explicit empty clause — always
//! false, but part of the clause count.

use crate::pbil::error::DimacsError;
use crate::pbil::problem::Problem;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::warn;

/// Parses DIMACS CNF data from a `BufRead` source into a validated
/// [`Problem`].
///
/// # Errors
///
/// - [`DimacsError::Io`] if reading fails.
/// - [`DimacsError::InvalidHeader`] for a malformed `p cnf` line.
/// - [`DimacsError::InvalidLiteral`] for a non-integer clause token.
/// - [`DimacsError::Problem`] if the parsed clauses violate the problem
///   model invariants (literal `0` mid-clause, variable out of range, empty
///   instance).
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Problem, DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for (line_idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_no = line_idx + 1;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c") => {}
            Some(&"p") => {
                header = Some(parse_header(&line, line_no)?);
            }
            Some(_) => {
                let literals: Vec<i32> = parts
                    .map(|token| {
                        token.parse::<i32>().map_err(|_| DimacsError::InvalidLiteral {
                            line: line_no,
                            token: token.to_string(),
                        })
                    })
                    .filter_ok(|&literal| literal != 0) // drop the clause terminator
                    .try_collect()?;

                // A bare `0` line is an explicit empty clause: it stays in
                // the instance, counts toward the fitness ceiling, and can
                // never be satisfied.
                clauses.push(literals);
            }
        }
    }

    let num_vars = match header {
        Some((vars, declared_clauses)) => {
            if declared_clauses != clauses.len() {
                warn!(
                    declared = declared_clauses,
                    found = clauses.len(),
                    "clause count disagrees with problem line, using the clauses found"
                );
            }
            vars
        }
        None => {
            let inferred = clauses
                .iter()
                .flatten()
                .map(|l| l.unsigned_abs() as usize)
                .max()
                .unwrap_or(0);
            warn!(inferred, "no problem line, inferring variable count");
            inferred
        }
    };

    Ok(Problem::new(num_vars, clauses)?)
}

/// Parses a `p cnf <vars> <clauses>` problem line.
fn parse_header(line: &str, line_no: usize) -> Result<(usize, usize), DimacsError> {
    let invalid = || DimacsError::InvalidHeader {
        line: line_no,
        content: line.to_string(),
    };

    let parts = line.split_whitespace().collect_vec();
    match parts.as_slice() {
        ["p", "cnf", vars, clauses] => {
            let vars = vars.parse().map_err(|_| invalid())?;
            let clauses = clauses.parse().map_err(|_| invalid())?;
            Ok((vars, clauses))
        }
        _ => Err(invalid()),
    }
}

/// Parses a DIMACS CNF file from disk. Convenience wrapper around
/// [`parse_dimacs`].
///
/// # Errors
///
/// Everything [`parse_dimacs`] reports, plus the open failure.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Problem, DimacsError> {
    let file = std::fs::File::open(path)?;
    parse_dimacs(io::BufReader::new(file))
}
