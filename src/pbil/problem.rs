#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The immutable MAXSAT problem model.
//!
//! A [`Problem`] is a validated, read-only CNF instance: a variable count and
//! a list of clauses, each clause a disjunction of signed integer literals
//! (positive literal `v` requires variable `v` true, negative requires it
//! false). Validation happens once, at construction; every later component
//! can rely on the invariants:
//!
//! - no literal is `0` (that is the DIMACS clause terminator),
//! - every referenced variable lies in `[1, num_vars]`,
//! - the instance has at least one variable and one clause.
//!
//! The model is shared by reference for the whole run and never mutated.

use crate::pbil::error::ProblemError;
use smallvec::SmallVec;
use std::io::{self, Write};

/// A single clause: a disjunction of signed, nonzero literals.
///
/// Most benchmark clauses are short (3-SAT dominates), so literals live
/// inline up to eight entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: SmallVec<[i32; 8]>,
}

impl Clause {
    /// Number of literals in the clause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` if the clause has no literals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Iterates the literals in clause order.
    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.literals.iter()
    }

    /// The literals as a slice.
    #[must_use]
    pub fn literals(&self) -> &[i32] {
        &self.literals
    }
}

impl From<Vec<i32>> for Clause {
    fn from(literals: Vec<i32>) -> Self {
        Self {
            literals: SmallVec::from_vec(literals),
        }
    }
}

/// A validated MAXSAT instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    num_vars: usize,
    clauses: Vec<Clause>,
}

impl Problem {
    /// Builds a problem from a variable count and raw clause lists,
    /// validating every invariant up front.
    ///
    /// # Errors
    ///
    /// - [`ProblemError::NoVariables`] if `num_vars == 0`.
    /// - [`ProblemError::NoClauses`] if `clauses` is empty.
    /// - [`ProblemError::ZeroLiteral`] if any clause contains `0`.
    /// - [`ProblemError::VariableOutOfRange`] if any literal references a
    ///   variable above `num_vars`.
    pub fn new<I>(num_vars: usize, clauses: I) -> Result<Self, ProblemError>
    where
        I: IntoIterator<Item = Vec<i32>>,
    {
        if num_vars == 0 {
            return Err(ProblemError::NoVariables);
        }

        let mut validated = Vec::new();

        for (clause_idx, literals) in clauses.into_iter().enumerate() {
            for &literal in &literals {
                if literal == 0 {
                    return Err(ProblemError::ZeroLiteral { clause: clause_idx });
                }
                if literal.unsigned_abs() as usize > num_vars {
                    return Err(ProblemError::VariableOutOfRange {
                        clause: clause_idx,
                        literal,
                        num_vars,
                    });
                }
            }
            validated.push(Clause::from(literals));
        }

        if validated.is_empty() {
            return Err(ProblemError::NoClauses);
        }

        Ok(Self {
            num_vars,
            clauses: validated,
        })
    }

    /// Generates a uniform random k-SAT instance: `n_clauses` clauses of
    /// `clause_len` distinct variables each, every literal negated with
    /// probability one half.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::ClauseLength`] if `clause_len > n_vars`, plus
    /// the construction errors of [`Problem::new`] for degenerate sizes.
    pub fn random(
        n_vars: usize,
        n_clauses: usize,
        clause_len: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, ProblemError> {
        if clause_len > n_vars {
            return Err(ProblemError::ClauseLength {
                requested: clause_len,
                num_vars: n_vars,
            });
        }

        let clauses = (0..n_clauses)
            .map(|_| {
                rng.choose_multiple(1..=n_vars, clause_len)
                    .into_iter()
                    .map(|var| {
                        let literal = i32::try_from(var).unwrap_or(i32::MAX);
                        if rng.bool() { literal } else { -literal }
                    })
                    .collect()
            })
            .collect::<Vec<Vec<i32>>>();

        Self::new(n_vars, clauses)
    }

    /// Number of variables in the instance.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Number of clauses in the instance. This is also the maximum
    /// achievable fitness.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses as a slice.
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Iterates the clauses in instance order.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Writes the instance in DIMACS CNF format: a `p cnf` header followed by
    /// one `0`-terminated clause line per clause.
    ///
    /// # Errors
    ///
    /// Propagates any I/O failure from the writer.
    pub fn write_dimacs<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            for literal in clause.iter() {
                write!(writer, "{literal} ")?;
            }
            writeln!(writer, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let problem = Problem::new(3, vec![vec![1, -2, 3], vec![-1, 2, -3]]).unwrap();
        assert_eq!(problem.num_vars(), 3);
        assert_eq!(problem.num_clauses(), 2);
        assert_eq!(problem.clauses()[0].literals(), &[1, -2, 3]);
    }

    #[test]
    fn test_new_rejects_zero_literal() {
        let err = Problem::new(3, vec![vec![1, 0, 3]]).unwrap_err();
        assert_eq!(err, ProblemError::ZeroLiteral { clause: 0 });
    }

    #[test]
    fn test_new_rejects_out_of_range_variable() {
        let err = Problem::new(2, vec![vec![1, 2], vec![-3]]).unwrap_err();
        assert_eq!(
            err,
            ProblemError::VariableOutOfRange {
                clause: 1,
                literal: -3,
                num_vars: 2,
            }
        );
    }

    #[test]
    fn test_new_rejects_empty_instance() {
        assert_eq!(
            Problem::new(0, vec![vec![1]]).unwrap_err(),
            ProblemError::NoVariables
        );
        assert_eq!(
            Problem::new(3, Vec::<Vec<i32>>::new()).unwrap_err(),
            ProblemError::NoClauses
        );
    }

    #[test]
    fn test_random_instance_is_valid() {
        let mut rng = fastrand::Rng::with_seed(7);
        let problem = Problem::random(20, 50, 3, &mut rng).unwrap();
        assert_eq!(problem.num_vars(), 20);
        assert_eq!(problem.num_clauses(), 50);

        for clause in problem.iter() {
            assert_eq!(clause.len(), 3);
            let mut vars: Vec<usize> = clause
                .iter()
                .map(|l| l.unsigned_abs() as usize)
                .collect();
            vars.sort_unstable();
            vars.dedup();
            assert_eq!(vars.len(), 3, "variables within a clause are distinct");
        }
    }

    #[test]
    fn test_random_rejects_overlong_clause() {
        let mut rng = fastrand::Rng::with_seed(7);
        let err = Problem::random(2, 5, 3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ProblemError::ClauseLength {
                requested: 3,
                num_vars: 2,
            }
        );
    }

    #[test]
    fn test_write_dimacs_round_trips_shape() {
        let problem = Problem::new(3, vec![vec![1, -2, 3], vec![-1, 2]]).unwrap();
        let mut out = Vec::new();
        problem.write_dimacs(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "p cnf 3 2\n1 -2 3 0\n-1 2 0\n");
    }
}
