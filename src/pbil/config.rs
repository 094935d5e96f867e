#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Run configuration.
//!
//! A [`PbilConfig`] gathers every knob the orchestrator consumes. Defaults
//! follow the usual PBIL parameterization for MAXSAT. Validation happens
//! once, before any generation runs; a rejected configuration never starts a
//! run.

use crate::pbil::error::ConfigError;
use crate::pbil::fitness::Fitness;
use serde::Serialize;

/// Configuration for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PbilConfig {
    /// Individuals sampled per generation.
    pub pop_size: usize,

    /// Pull toward the generation's best individual, in `[0, 1]`.
    pub learning_rate: f64,

    /// Push away from the generation's worst individual on contested bits,
    /// in `[0, 1]`.
    pub negative_learning_rate: f64,

    /// Per-bit chance of a mutation perturbation, in `[0, 1]`.
    pub mutation_probability: f64,

    /// Magnitude of a mutation perturbation.
    pub mutation_shift: f64,

    /// Generation ceiling; the run stops here if it has not converged.
    pub max_generations: usize,

    /// Convergence threshold. `None` means every clause must be satisfied.
    pub target_fitness: Option<Fitness>,

    /// Seed for the run's random stream. `None` draws a fresh seed, making
    /// the run non-reproducible.
    pub random_seed: Option<u64>,
}

impl Default for PbilConfig {
    fn default() -> Self {
        Self {
            pop_size: 100,
            learning_rate: 0.1,
            negative_learning_rate: 0.075,
            mutation_probability: 0.02,
            mutation_shift: 0.05,
            max_generations: 1000,
            target_fitness: None,
            random_seed: None,
        }
    }
}

impl PbilConfig {
    /// Checks every option against its valid domain.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop_size < 1 {
            return Err(ConfigError::PopulationSize(self.pop_size));
        }
        if !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(ConfigError::LearningRate(self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.negative_learning_rate) {
            return Err(ConfigError::NegativeLearningRate(
                self.negative_learning_rate,
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbability(self.mutation_probability));
        }
        if !self.mutation_shift.is_finite() || self.mutation_shift < 0.0 {
            return Err(ConfigError::MutationShift(self.mutation_shift));
        }
        if self.max_generations < 1 {
            return Err(ConfigError::MaxGenerations(self.max_generations));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PbilConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = PbilConfig {
            pop_size: 0,
            ..PbilConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PopulationSize(0)));
    }

    #[test]
    fn test_rejects_negative_learning_rate() {
        let config = PbilConfig {
            learning_rate: -0.1,
            ..PbilConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::LearningRate(-0.1)));
    }

    #[test]
    fn test_rejects_mutation_probability_above_one() {
        let config = PbilConfig {
            mutation_probability: 1.5,
            ..PbilConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MutationProbability(1.5))
        );
    }

    #[test]
    fn test_rejects_negative_shift_and_nan() {
        let config = PbilConfig {
            mutation_shift: -0.05,
            ..PbilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutationShift(_))
        ));

        let config = PbilConfig {
            mutation_shift: f64::NAN,
            ..PbilConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MutationShift(_))
        ));
    }

    #[test]
    fn test_rejects_zero_generations() {
        let config = PbilConfig {
            max_generations: 0,
            ..PbilConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::MaxGenerations(0)));
    }
}
