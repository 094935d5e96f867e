#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The PBIL dual learning rule.
//!
//! For every variable `i` the update is:
//!
//! ```text
//! p[i] += lr * (best[i] - p[i])
//! if best[i] != worst[i]:
//!     p[i] += neg_lr * (best[i] - worst[i])
//! ```
//!
//! The first term pulls each probability toward the best individual's bit.
//! The second applies only where best and worst disagree: on those contested
//! bits the probability moves further in the direction the best differed from
//! the worst. Where the two agree there is no discriminating signal, so no
//! negative-learning term applies.
//!
//! The update is computed into a fresh vector and handed back whole; the
//! orchestrator swaps it in, so a partially-applied update can never be
//! observed. Values pushed out of `[0, 1]` by the arithmetic are clamped at
//! construction and reported as a count.

use crate::pbil::population::Individual;
use crate::pbil::probability::ProbabilityVector;

/// Applies one generation's learning update, returning the next probability
/// vector and the number of values clamped back into `[0, 1]`.
#[must_use]
pub fn update(
    prob_vector: &ProbabilityVector,
    best: &Individual,
    worst: &Individual,
    learning_rate: f64,
    negative_learning_rate: f64,
) -> (ProbabilityVector, usize) {
    let values = prob_vector
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let best_bit = f64::from(u8::from(best.get(i)));
            let mut next = p + learning_rate * (best_bit - p);
            if best.get(i) != worst.get(i) {
                let worst_bit = f64::from(u8::from(worst.get(i)));
                next += negative_learning_rate * (best_bit - worst_bit);
            }
            next
        })
        .collect();

    ProbabilityVector::from_clamped(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulls_toward_best() {
        let pv = ProbabilityVector::uniform(2);
        let best = Individual::from_bits([true, false]);
        // Worst agrees with best, so only the positive term applies.
        let worst = best.clone();
        let (next, clamped) = update(&pv, &best, &worst, 0.1, 0.075);

        assert_eq!(clamped, 0);
        assert!((next[0] - 0.55).abs() < 1e-12);
        assert!((next[1] - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_negative_term_only_on_disagreement() {
        let pv = ProbabilityVector::uniform(2);
        let best = Individual::from_bits([true, true]);
        let worst = Individual::from_bits([false, true]);
        let (next, _) = update(&pv, &best, &worst, 0.1, 0.075);

        // Bit 0 is contested: 0.5 + 0.1*0.5 + 0.075*1 = 0.625.
        assert!((next[0] - 0.625).abs() < 1e-12);
        // Bit 1 agrees: 0.5 + 0.1*0.5 = 0.55.
        assert!((next[1] - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_result_stays_in_range() {
        let (pv, _) = ProbabilityVector::from_clamped(vec![0.99, 0.01]);
        let best = Individual::from_bits([true, false]);
        let worst = Individual::from_bits([false, true]);
        let (next, _) = update(&pv, &best, &worst, 0.5, 0.5);

        assert!(next.is_valid());
    }

    #[test]
    fn test_zero_rates_are_identity() {
        let (pv, _) = ProbabilityVector::from_clamped(vec![0.2, 0.8]);
        let best = Individual::from_bits([true, false]);
        let worst = Individual::from_bits([false, true]);
        let (next, clamped) = update(&pv, &best, &worst, 0.0, 0.0);

        assert_eq!(clamped, 0);
        assert_eq!(next.as_slice(), pv.as_slice());
    }

    #[test]
    fn test_full_learning_rate_converges_to_best() {
        let pv = ProbabilityVector::uniform(3);
        let best = Individual::from_bits([true, false, true]);
        let worst = Individual::from_bits([true, false, true]);
        let (next, _) = update(&pv, &best, &worst, 1.0, 0.0);

        assert_eq!(next.as_slice(), &[1.0, 0.0, 1.0]);
    }
}
