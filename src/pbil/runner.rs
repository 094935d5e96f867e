#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The generation loop.
//!
//! [`Pbil`] owns every piece of run state: the probability vector, the
//! random stream, the generation counter, and the best-ever individual. No
//! other component holds a reference to any of it across generation
//! boundaries; the sampler, evaluator, selector, learner, and mutator are
//! all called with borrows scoped to a single generation.
//!
//! The run is a lazy, finite, non-restartable sequence of [`Snapshot`]
//! records: `Pbil` implements `Iterator`, producing one snapshot per
//! completed generation. Consumers that just want the answer call
//! [`Pbil::run`]; anything that wants per-generation progress (a CLI
//! progress line, a JSON stream, a test harness) walks the iterator or uses
//! [`Pbil::run_with`]. The transport is the consumer's concern; the only
//! feedback path into the loop is the cancellation token.
//!
//! Termination policy, checked once per generation boundary and never
//! mid-generation:
//! 1. [`RunState::Converged`] once best-ever fitness reaches the target.
//! 2. [`RunState::Stopped`] on cancellation or an elapsed timeout.
//! 3. [`RunState::MaxGenerationsReached`] at the configured ceiling.
//!
//! An interrupted generation leaves no trace: learner and mutator compute
//! into a fresh vector which is swapped in whole, so the last committed
//! probability vector and best-ever individual always remain valid.

use crate::pbil::config::PbilConfig;
use crate::pbil::error::ConfigError;
use crate::pbil::fitness::{evaluate_population, Fitness};
use crate::pbil::learning;
use crate::pbil::mutation;
use crate::pbil::population::{generate_population, Individual};
use crate::pbil::probability::ProbabilityVector;
use crate::pbil::problem::Problem;
use crate::pbil::selection::{find_best, find_worst};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// The orchestrator's state machine. `Initialized` and `Running` are the
/// live states; the other four are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    /// Constructed, no generation run yet.
    Initialized,
    /// At least one generation run, no terminal condition met.
    Running,
    /// Best-ever fitness reached the target; an early-exit success.
    Converged,
    /// Generation ceiling reached without convergence; the result is the
    /// best-ever found, not necessarily optimal.
    MaxGenerationsReached,
    /// Cancelled (or timed out) between generations; a successful but
    /// incomplete run.
    Stopped,
    /// An internal invariant was violated; no further generations run.
    Failed,
}

impl RunState {
    /// `true` once the run can make no further progress.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Initialized | Self::Running)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Converged => "converged",
            Self::MaxGenerationsReached => "max generations reached",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Progress record emitted after every completed generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Generations completed so far (1 after the first generation).
    pub generation: usize,
    /// Fitness of the best individual seen across the whole run.
    pub best_ever_fitness: Fitness,
    /// Clause count of the problem; the fitness ceiling.
    pub max_fitness: Fitness,
    /// The probability vector as committed at the end of this generation.
    pub probability_vector: ProbabilityVector,
    /// The best individual seen across the whole run.
    pub best_ever: Individual,
}

/// Terminal record describing a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// The terminal state the run ended in.
    pub state: RunState,
    /// Best individual found, if at least one generation completed.
    pub best_individual: Option<Individual>,
    /// Fitness of `best_individual` (0 when no generation completed).
    pub fitness: Fitness,
    /// Clause count of the problem; the fitness ceiling.
    pub max_fitness: Fitness,
    /// Number of fully-committed generations.
    pub generations_run: usize,
    /// Generation at which the best-ever individual was first found.
    pub best_generation: usize,
    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,
    /// The probability vector as committed at the end of the run. Its
    /// [`mean`](ProbabilityVector::mean) and
    /// [`entropy`](ProbabilityVector::entropy) summarize how far the search
    /// had converged when it stopped.
    pub probability_vector: ProbabilityVector,
    /// Probability values clamped back into `[0, 1]` over the whole run;
    /// recovered numeric-instability events.
    pub clamp_events: usize,
}

impl RunResult {
    /// Fraction of clauses satisfied by the best individual, in `[0, 1]`.
    #[must_use]
    pub fn success_ratio(&self) -> f64 {
        if self.max_fitness == 0 {
            return 0.0;
        }
        self.fitness as f64 / self.max_fitness as f64
    }
}

/// Cooperative cancellation signal, checked once per generation boundary.
///
/// Clone freely; all clones share the flag. Cancelling mid-generation takes
/// effect at the next boundary, discarding nothing that was already
/// committed.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One PBIL optimization run over a borrowed, immutable [`Problem`].
#[derive(Debug)]
pub struct Pbil<'a> {
    problem: &'a Problem,
    config: PbilConfig,
    target: Fitness,
    prob_vector: ProbabilityVector,
    rng: fastrand::Rng,
    state: RunState,
    generation: usize,
    best: Option<(Individual, Fitness)>,
    best_generation: usize,
    cancel: Option<CancellationToken>,
    deadline: Option<Instant>,
    started: Option<Instant>,
    elapsed: Duration,
    clamp_events: usize,
}

impl<'a> Pbil<'a> {
    /// Prepares a run: validates the configuration, seeds the random
    /// stream, and sets the probability vector to the maximum-entropy prior.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] if any option is outside its valid
    /// domain; the loop never starts on a rejected configuration.
    pub fn new(problem: &'a Problem, config: PbilConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = config
            .random_seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let target = config.target_fitness.unwrap_or_else(|| problem.num_clauses());

        info!(
            num_vars = problem.num_vars(),
            num_clauses = problem.num_clauses(),
            pop_size = config.pop_size,
            target,
            "run initialized"
        );

        Ok(Self {
            prob_vector: ProbabilityVector::uniform(problem.num_vars()),
            problem,
            config,
            target,
            rng,
            state: RunState::Initialized,
            generation: 0,
            best: None,
            best_generation: 0,
            cancel: None,
            deadline: None,
            started: None,
            elapsed: Duration::ZERO,
            clamp_events: 0,
        })
    }

    /// Attaches a cancellation token, checked at every generation boundary.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attaches a wall-clock limit; on expiry the run stops at the next
    /// generation boundary exactly as if it had been cancelled.
    #[must_use]
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.deadline = Some(Instant::now() + limit);
        self
    }

    /// Current state of the run's state machine.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Generations fully committed so far.
    #[must_use]
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness of the best-ever individual, once one exists.
    #[must_use]
    pub fn best_fitness(&self) -> Option<Fitness> {
        self.best.as_ref().map(|(_, fitness)| *fitness)
    }

    /// The current probability vector.
    #[must_use]
    pub const fn probability_vector(&self) -> &ProbabilityVector {
        &self.prob_vector
    }

    /// Runs one generation and returns its snapshot, or `None` once the run
    /// has reached a terminal state.
    pub fn step(&mut self) -> Option<Snapshot> {
        match self.state {
            RunState::Initialized => {
                self.started = Some(Instant::now());
                self.state = RunState::Running;
            }
            RunState::Running => {}
            _ => return None,
        }

        // Generation boundary: termination policy, in priority order.
        if self.best_fitness().is_some_and(|f| f >= self.target) {
            self.finish(RunState::Converged);
            return None;
        }
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            self.finish(RunState::Stopped);
            return None;
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.finish(RunState::Stopped);
            return None;
        }
        if self.generation >= self.config.max_generations {
            self.finish(RunState::MaxGenerationsReached);
            return None;
        }

        let population =
            generate_population(&self.prob_vector, self.config.pop_size, &mut self.rng);
        let fitnesses = evaluate_population(self.problem, &population);

        let (Some(best_idx), Some(worst_idx)) = (find_best(&fitnesses), find_worst(&fitnesses))
        else {
            error!("selection over an empty population");
            self.finish(RunState::Failed);
            return None;
        };

        let (learned, clamped_learning) = learning::update(
            &self.prob_vector,
            &population[best_idx],
            &population[worst_idx],
            self.config.learning_rate,
            self.config.negative_learning_rate,
        );
        let (mutated, clamped_mutation) = mutation::mutate(
            &learned,
            self.config.mutation_probability,
            self.config.mutation_shift,
            &mut self.rng,
        );

        if !mutated.is_valid() {
            error!("probability vector left [0, 1] after clamping");
            self.finish(RunState::Failed);
            return None;
        }

        let clamped = clamped_learning + clamped_mutation;
        if clamped > 0 {
            self.clamp_events += clamped;
            warn!(clamped, generation = self.generation + 1, "probability values clamped");
        }

        // Commit point: the fully computed vector is swapped in whole.
        self.prob_vector = mutated;
        self.generation += 1;

        let generation_best = fitnesses[best_idx];
        match &mut self.best {
            Some((individual, fitness)) if generation_best > *fitness => {
                // Strict improvement only: ties keep the earliest witness.
                *individual = population[best_idx].clone();
                *fitness = generation_best;
                self.best_generation = self.generation;
            }
            None => {
                self.best = Some((population[best_idx].clone(), generation_best));
                self.best_generation = self.generation;
            }
            _ => {}
        }

        let (best_ever, best_ever_fitness) = self
            .best
            .as_ref()
            .map(|(individual, fitness)| (individual.clone(), *fitness))?;

        debug!(
            generation = self.generation,
            generation_best,
            best_ever = best_ever_fitness,
            max = self.problem.num_clauses(),
            "generation committed"
        );

        Some(Snapshot {
            generation: self.generation,
            best_ever_fitness,
            max_fitness: self.problem.num_clauses(),
            probability_vector: self.prob_vector.clone(),
            best_ever,
        })
    }

    /// Drains the run to a terminal state and returns its result.
    #[must_use]
    pub fn run(mut self) -> RunResult {
        while self.step().is_some() {}
        self.into_result()
    }

    /// Drains the run, handing every snapshot to `observer` as it is
    /// produced, and returns the terminal result.
    pub fn run_with<F: FnMut(&Snapshot)>(mut self, mut observer: F) -> RunResult {
        while let Some(snapshot) = self.step() {
            observer(&snapshot);
        }
        self.into_result()
    }

    /// Consumes the run and builds its terminal record. A run abandoned
    /// before reaching a terminal state is reported as [`RunState::Stopped`]
    /// with everything committed so far.
    #[must_use]
    pub fn into_result(mut self) -> RunResult {
        if !self.state.is_terminal() {
            self.finish(RunState::Stopped);
        }

        let (best_individual, fitness) = match self.best {
            Some((individual, fitness)) => (Some(individual), fitness),
            None => (None, 0),
        };

        RunResult {
            state: self.state,
            best_individual,
            fitness,
            max_fitness: self.problem.num_clauses(),
            generations_run: self.generation,
            best_generation: self.best_generation,
            elapsed: self.elapsed,
            probability_vector: self.prob_vector,
            clamp_events: self.clamp_events,
        }
    }

    fn finish(&mut self, state: RunState) {
        self.state = state;
        if let Some(started) = self.started {
            self.elapsed = started.elapsed();
        }
        info!(
            state = %state,
            generations = self.generation,
            best = self.best_fitness().unwrap_or(0),
            max = self.problem.num_clauses(),
            clamp_events = self.clamp_events,
            "run finished"
        );
    }
}

impl Iterator for Pbil<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        self.step()
    }
}
