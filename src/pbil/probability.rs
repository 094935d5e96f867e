#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The probability vector: the engine's only cross-generation state.
//!
//! One probability per variable, each the chance that the variable samples
//! `true`. The vector starts at `0.5` everywhere (maximum-entropy prior) and
//! is replaced exactly once per generation by the learner and mutator, which
//! both build a fresh vector through [`ProbabilityVector::from_clamped`] and
//! swap it in whole. Clamping at that single construction point is what keeps
//! every value inside `[0, 1]` despite repeated floating-point addition.

use serde::Serialize;
use std::ops::Index;

/// An ordered sequence of per-variable probabilities, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProbabilityVector(Vec<f64>);

impl ProbabilityVector {
    /// The maximum-entropy starting vector: `0.5` for every variable.
    #[must_use]
    pub fn uniform(num_vars: usize) -> Self {
        Self(vec![0.5; num_vars])
    }

    /// Builds a vector from raw values, clamping each into `[0, 1]`.
    ///
    /// Returns the vector together with the number of values that were out
    /// of range and had to be clamped; callers count these as recovered
    /// numeric-instability events.
    #[must_use]
    pub fn from_clamped(values: Vec<f64>) -> (Self, usize) {
        let mut clamped = 0;
        let values = values
            .into_iter()
            .map(|p| {
                if (0.0..=1.0).contains(&p) {
                    p
                } else {
                    clamped += 1;
                    p.clamp(0.0, 1.0)
                }
            })
            .collect();
        (Self(values), clamped)
    }

    /// Number of variables covered by the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the vector covers no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the probabilities in variable order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// The probabilities as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `true` if every value lies in `[0, 1]` and is finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p))
    }

    /// Mean probability across all variables.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }

    /// Mean per-bit Shannon entropy, in bits. `1.0` is the fully undecided
    /// starting vector, `0.0` a fully converged (degenerate) one. Useful as
    /// a diversity measure when watching a run.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }

        // Keep p away from 0 and 1 so log2 stays finite.
        const EPSILON: f64 = 1e-10;

        let total: f64 = self
            .0
            .iter()
            .map(|&p| {
                let p = p.clamp(EPSILON, 1.0 - EPSILON);
                -(p * p.log2() + (1.0 - p) * (1.0 - p).log2())
            })
            .sum();
        total / self.0.len() as f64
    }
}

impl Index<usize> for ProbabilityVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_starts_at_half() {
        let pv = ProbabilityVector::uniform(4);
        assert_eq!(pv.len(), 4);
        assert!(pv.iter().all(|&p| (p - 0.5).abs() < f64::EPSILON));
        assert!(pv.is_valid());
    }

    #[test]
    fn test_from_clamped_counts_out_of_range() {
        let (pv, clamped) = ProbabilityVector::from_clamped(vec![-0.1, 0.5, 1.2, 1.0]);
        assert_eq!(clamped, 2);
        assert_eq!(pv.as_slice(), &[0.0, 0.5, 1.0, 1.0]);
        assert!(pv.is_valid());
    }

    #[test]
    fn test_from_clamped_leaves_in_range_untouched() {
        let (pv, clamped) = ProbabilityVector::from_clamped(vec![0.0, 0.25, 1.0]);
        assert_eq!(clamped, 0);
        assert_eq!(pv.as_slice(), &[0.0, 0.25, 1.0]);
    }

    #[test]
    fn test_entropy_bounds() {
        let undecided = ProbabilityVector::uniform(8);
        assert!((undecided.entropy() - 1.0).abs() < 1e-9);

        let (converged, _) = ProbabilityVector::from_clamped(vec![0.0, 1.0, 1.0, 0.0]);
        assert!(converged.entropy() < 1e-6);
    }

    #[test]
    fn test_mean() {
        let (pv, _) = ProbabilityVector::from_clamped(vec![0.0, 0.5, 1.0]);
        assert!((pv.mean() - 0.5).abs() < f64::EPSILON);
    }
}
