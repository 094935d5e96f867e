#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Best and worst selection over an evaluated population.
//!
//! Both selections are single linear scans over the fitness list. Ties break
//! to the first individual in population order; a stable, deterministic
//! tie-break is required for reproducible runs. The worst selection always
//! operates on the current generation only, never on the run's best-ever.

use crate::pbil::fitness::Fitness;

/// Index of the highest-fitness individual, first wins on ties.
/// `None` only for an empty population.
#[must_use]
pub fn find_best(fitnesses: &[Fitness]) -> Option<usize> {
    let mut best: Option<(usize, Fitness)> = None;
    for (idx, &fitness) in fitnesses.iter().enumerate() {
        // Strict comparison keeps the first individual on ties.
        if best.is_none_or(|(_, current)| fitness > current) {
            best = Some((idx, fitness));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Index of the lowest-fitness individual, first wins on ties.
/// `None` only for an empty population.
#[must_use]
pub fn find_worst(fitnesses: &[Fitness]) -> Option<usize> {
    let mut worst: Option<(usize, Fitness)> = None;
    for (idx, &fitness) in fitnesses.iter().enumerate() {
        if worst.is_none_or(|(_, current)| fitness < current) {
            worst = Some((idx, fitness));
        }
    }
    worst.map(|(idx, _)| idx)
}
