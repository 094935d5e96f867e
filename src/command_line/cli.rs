//! Defines the command-line interface for the PBIL MAXSAT solver.
//!
//! Uses `clap` for parsing arguments.

use clap::{Args, Parser, Subcommand};
use pbil_maxsat::pbil::config::PbilConfig;
use std::path::PathBuf;

/// Top-level CLI: an optional bare path (treated as `solve`) or a
/// subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "pbil-maxsat",
    version,
    about = "A MAXSAT solver based on Population-Based Incremental Learning"
)]
pub struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a MAXSAT instance from a DIMACS .cnf file.
    Solve {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file found under a directory, recursively.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate a uniform random k-SAT instance and print it as DIMACS.
    Generate {
        /// Number of variables.
        #[arg(long)]
        vars: usize,

        /// Number of clauses.
        #[arg(long)]
        clauses: usize,

        /// Literals per clause.
        #[arg(long, default_value_t = 3)]
        clause_len: usize,

        /// Seed for instance generation; omit for a random instance.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the instance to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Run options shared by the solving subcommands.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Individuals sampled per generation.
    #[arg(long, default_value_t = 100)]
    pub pop_size: usize,

    /// Learning rate: pull toward the generation's best individual.
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Negative learning rate: push away from the generation's worst
    /// individual on bits where best and worst disagree.
    #[arg(long, default_value_t = 0.075)]
    pub negative_learning_rate: f64,

    /// Per-bit probability of a mutation perturbation.
    #[arg(long, default_value_t = 0.02)]
    pub mutation_probability: f64,

    /// Magnitude of a mutation perturbation.
    #[arg(long, default_value_t = 0.05)]
    pub mutation_shift: f64,

    /// Generation ceiling.
    #[arg(long, default_value_t = 1000)]
    pub max_generations: usize,

    /// Stop once this many clauses are satisfied (default: all of them).
    #[arg(long)]
    pub target_fitness: Option<usize>,

    /// Seed for a reproducible run; omit for a fresh seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abandon the run after this many seconds of wall-clock time.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Stream one JSON snapshot per generation to stdout instead of the
    /// human-readable progress lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Print the best assignment found as a 0/1 string.
    #[arg(short, long, default_value_t = false)]
    pub print_solution: bool,

    /// Print run and memory statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub stats: bool,
}

impl CommonOptions {
    /// Maps the parsed flags onto an engine configuration.
    #[must_use]
    pub fn to_config(&self) -> PbilConfig {
        PbilConfig {
            pop_size: self.pop_size,
            learning_rate: self.learning_rate,
            negative_learning_rate: self.negative_learning_rate,
            mutation_probability: self.mutation_probability,
            mutation_shift: self.mutation_shift,
            max_generations: self.max_generations,
            target_fitness: self.target_fitness,
            random_seed: self.seed,
        }
    }
}
