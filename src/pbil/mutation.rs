#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Stochastic perturbation of the probability vector.
//!
//! After learning, each probability is independently perturbed with
//! probability `mutation_probability` by `mutation_shift` in a uniformly
//! random direction. This reinjects exploration noise every generation and
//! keeps the vector from collapsing into a degenerate all-0/all-1 state
//! under selection pressure alone.
//!
//! Like the learner, the mutator builds a fresh vector and clamps at
//! construction, reporting how many values left `[0, 1]`.

use crate::pbil::probability::ProbabilityVector;

/// Applies one generation's mutation pass, returning the next probability
/// vector and the number of values clamped back into `[0, 1]`.
#[must_use]
pub fn mutate(
    prob_vector: &ProbabilityVector,
    mutation_probability: f64,
    mutation_shift: f64,
    rng: &mut fastrand::Rng,
) -> (ProbabilityVector, usize) {
    let values = prob_vector
        .iter()
        .map(|&p| {
            if rng.f64() < mutation_probability {
                if rng.bool() {
                    p + mutation_shift
                } else {
                    p - mutation_shift
                }
            } else {
                p
            }
        })
        .collect();

    ProbabilityVector::from_clamped(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_probability_is_identity() {
        let pv = ProbabilityVector::uniform(8);
        let mut rng = fastrand::Rng::with_seed(3);
        let (next, clamped) = mutate(&pv, 0.0, 0.5, &mut rng);

        assert_eq!(clamped, 0);
        assert_eq!(next.as_slice(), pv.as_slice());
    }

    #[test]
    fn test_always_mutate_shifts_every_value() {
        let pv = ProbabilityVector::uniform(32);
        let mut rng = fastrand::Rng::with_seed(3);
        let (next, _) = mutate(&pv, 1.0, 0.1, &mut rng);

        for &p in next.iter() {
            assert!((p - 0.4).abs() < 1e-12 || (p - 0.6).abs() < 1e-12);
        }
    }

    #[test]
    fn test_clamps_at_boundaries() {
        let (pv, _) = ProbabilityVector::from_clamped(vec![0.0, 1.0]);
        let mut rng = fastrand::Rng::with_seed(3);
        let (next, _) = mutate(&pv, 1.0, 0.5, &mut rng);

        assert!(next.is_valid());
    }

    #[test]
    fn test_deterministic_under_seed() {
        let pv = ProbabilityVector::uniform(16);
        let mut a = fastrand::Rng::with_seed(9);
        let mut b = fastrand::Rng::with_seed(9);

        assert_eq!(mutate(&pv, 0.5, 0.05, &mut a), mutate(&pv, 0.5, 0.05, &mut b));
    }
}
