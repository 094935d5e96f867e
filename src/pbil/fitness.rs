#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Fitness evaluation: counting satisfied clauses.
//!
//! Evaluation is a pure function of a problem and an individual, so
//! individuals can be scored independently and in any order. A clause is
//! satisfied as soon as one of its literals matches the assignment, so the
//! per-clause scan short-circuits; the result does not depend on literal
//! order.

use crate::pbil::population::Individual;
use crate::pbil::problem::{Clause, Problem};

/// Count of satisfied clauses, in `[0, num_clauses]`.
pub type Fitness = usize;

/// `true` if the literal matches the individual's assignment: a positive
/// literal `v` needs variable `v` true, a negative one needs it false.
fn literal_satisfied(literal: i32, individual: &Individual) -> bool {
    let var = literal.unsigned_abs() as usize - 1;
    if literal > 0 {
        individual.get(var)
    } else {
        !individual.get(var)
    }
}

/// `true` if any literal of the clause matches the assignment.
#[must_use]
pub fn clause_satisfied(clause: &Clause, individual: &Individual) -> bool {
    clause.iter().any(|&l| literal_satisfied(l, individual))
}

/// Scores an individual: the number of clauses it satisfies.
#[must_use]
pub fn evaluate(problem: &Problem, individual: &Individual) -> Fitness {
    problem
        .iter()
        .filter(|clause| clause_satisfied(clause, individual))
        .count()
}

/// Scores every individual of a population, preserving population order.
#[must_use]
pub fn evaluate_population(problem: &Problem, population: &[Individual]) -> Vec<Fitness> {
    population
        .iter()
        .map(|individual| evaluate(problem, individual))
        .collect()
}

/// Indices of the clauses the individual leaves unsatisfied. Empty exactly
/// when the individual is a full satisfying assignment.
#[must_use]
pub fn unsatisfied_clauses(problem: &Problem, individual: &Individual) -> Vec<usize> {
    problem
        .iter()
        .enumerate()
        .filter(|(_, clause)| !clause_satisfied(clause, individual))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_var_problem() -> Problem {
        Problem::new(3, vec![vec![1, -2, 3], vec![-1, 2, -3], vec![1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_full_satisfying_assignment() {
        let problem = three_var_problem();
        // x1=1, x2=1, x3=0 satisfies all three clauses.
        let individual = Individual::from_bits([true, true, false]);
        assert_eq!(evaluate(&problem, &individual), 3);
        assert!(unsatisfied_clauses(&problem, &individual).is_empty());
    }

    #[test]
    fn test_partial_assignment() {
        let problem = three_var_problem();
        // x1=0, x2=1, x3=0 falsifies clause 0, satisfies clauses 1 and 2.
        let individual = Individual::from_bits([false, true, false]);
        assert_eq!(evaluate(&problem, &individual), 2);
        assert_eq!(unsatisfied_clauses(&problem, &individual), vec![0]);
    }

    #[test]
    fn test_fitness_zero() {
        let problem = Problem::new(2, vec![vec![1], vec![2]]).unwrap();
        let individual = Individual::from_bits([false, false]);
        assert_eq!(evaluate(&problem, &individual), 0);
        assert_eq!(unsatisfied_clauses(&problem, &individual), vec![0, 1]);
    }

    #[test]
    fn test_negative_literal_polarity() {
        let problem = Problem::new(1, vec![vec![-1]]).unwrap();
        assert_eq!(evaluate(&problem, &Individual::from_bits([false])), 1);
        assert_eq!(evaluate(&problem, &Individual::from_bits([true])), 0);
    }

    #[test]
    fn test_empty_clause_is_never_satisfied() {
        let problem = Problem::new(1, vec![vec![1], vec![]]).unwrap();
        assert_eq!(evaluate(&problem, &Individual::from_bits([true])), 1);
        assert_eq!(evaluate(&problem, &Individual::from_bits([false])), 0);
        assert_eq!(
            unsatisfied_clauses(&problem, &Individual::from_bits([true])),
            vec![1]
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let problem = three_var_problem();
        let individual = Individual::from_bits([true, false, true]);
        let first = evaluate(&problem, &individual);
        let second = evaluate(&problem, &individual);
        assert_eq!(first, second);
    }

    #[test]
    fn test_population_order_preserved() {
        let problem = three_var_problem();
        let population = vec![
            Individual::from_bits([true, true, false]),
            Individual::from_bits([false, true, false]),
        ];
        assert_eq!(evaluate_population(&problem, &population), vec![3, 2]);
    }
}
