#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Individuals and population sampling.
//!
//! An [`Individual`] is one candidate assignment: a bit-vector of length
//! `num_vars`, bit `i` holding the value of variable `i + 1`. Individuals are
//! ephemeral; a fresh population is drawn from the probability vector every
//! generation and discarded after selection, except for the run's best-ever,
//! which the orchestrator clones out.
//!
//! Sampling takes an explicit random-source handle rather than touching any
//! global generator: the orchestrator owns the run stream, and each
//! individual draws from its own forked substream. That keeps runs
//! reproducible under a fixed seed and leaves the per-individual draws
//! independent of each other.

use crate::pbil::probability::ProbabilityVector;
use bit_vec::BitVec;
use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;

/// One sampled candidate bit-vector assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Individual(BitVec);

impl Individual {
    /// Builds an individual from explicit bit values. Mostly useful in tests
    /// and when reconstructing a reported solution.
    #[must_use]
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        Self(bits.into_iter().collect())
    }

    /// The value of variable `index + 1`. Out-of-range indices read as
    /// `false`.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index) == Some(true)
    }

    /// Number of variables covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the individual covers no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the bit values in variable order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter()
    }
}

impl fmt::Display for Individual {
    /// Renders the assignment as a compact `0`/`1` string, variable 1 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter() {
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

impl Serialize for Individual {
    /// Serializes as the same `0`/`1` string [`Display`](fmt::Display) uses,
    /// which keeps snapshot records compact for long bit-vectors.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Draws `pop_size` individuals from the probability vector: one independent
/// Bernoulli trial per individual per variable, bit `i` set when the draw
/// falls below `prob_vector[i]`.
///
/// Each individual samples from a substream forked off `rng`, so the draws
/// advance the run stream deterministically regardless of evaluation order.
#[must_use]
pub fn generate_population(
    prob_vector: &ProbabilityVector,
    pop_size: usize,
    rng: &mut fastrand::Rng,
) -> Vec<Individual> {
    (0..pop_size)
        .map(|_| {
            let mut stream = rng.fork();
            let mut bits = BitVec::with_capacity(prob_vector.len());
            for &p in prob_vector.iter() {
                bits.push(stream.f64() < p);
            }
            Individual(bits)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_shape() {
        let pv = ProbabilityVector::uniform(10);
        let mut rng = fastrand::Rng::with_seed(1);
        let population = generate_population(&pv, 25, &mut rng);
        assert_eq!(population.len(), 25);
        assert!(population.iter().all(|ind| ind.len() == 10));
    }

    #[test]
    fn test_degenerate_probabilities_are_deterministic() {
        let (pv, _) = ProbabilityVector::from_clamped(vec![0.0, 1.0, 0.0, 1.0]);
        let mut rng = fastrand::Rng::with_seed(1);
        let population = generate_population(&pv, 8, &mut rng);
        for ind in &population {
            assert!(!ind.get(0));
            assert!(ind.get(1));
            assert!(!ind.get(2));
            assert!(ind.get(3));
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let pv = ProbabilityVector::uniform(16);
        let mut a = fastrand::Rng::with_seed(42);
        let mut b = fastrand::Rng::with_seed(42);
        assert_eq!(
            generate_population(&pv, 10, &mut a),
            generate_population(&pv, 10, &mut b)
        );
    }

    #[test]
    fn test_different_seed_different_population() {
        let pv = ProbabilityVector::uniform(64);
        let mut a = fastrand::Rng::with_seed(1);
        let mut b = fastrand::Rng::with_seed(2);
        assert_ne!(
            generate_population(&pv, 4, &mut a),
            generate_population(&pv, 4, &mut b)
        );
    }

    #[test]
    fn test_display_and_get() {
        let ind = Individual::from_bits([true, false, true]);
        assert_eq!(ind.to_string(), "101");
        assert!(ind.get(0));
        assert!(!ind.get(1));
        assert!(!ind.get(99), "out of range reads as false");
    }
}
