//! # pbil-maxsat
//!
//! A command-line MAXSAT solver built on Population-Based Incremental
//! Learning (PBIL). It parses DIMACS CNF instances and searches for an
//! assignment maximizing the number of satisfied clauses by evolving a
//! probability vector over bit values, generation by generation.
//!
//! ## Usage
//!
//! ```sh
//! # Solve a DIMACS file with the default parameters
//! pbil-maxsat problem.cnf
//!
//! # Reproducible run with explicit parameters
//! pbil-maxsat solve --path problem.cnf --seed 42 --pop-size 200 --max-generations 5000
//!
//! # Stream one JSON snapshot per generation (for dashboards or harnesses)
//! pbil-maxsat solve --path problem.cnf --json
//!
//! # Batch-solve every .cnf under a directory
//! pbil-maxsat dir --path benchmarks/
//!
//! # Generate a random 3-SAT instance
//! pbil-maxsat generate --vars 50 --clauses 210 --seed 1 -o random.cnf
//! ```
//!
//! Logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=pbil_maxsat=debug`).

use clap::{CommandFactory, Parser};
use pbil_maxsat::pbil::dimacs::parse_file;
use pbil_maxsat::pbil::error::Error;
use pbil_maxsat::pbil::fitness::unsatisfied_clauses;
use pbil_maxsat::pbil::problem::Problem;
use pbil_maxsat::pbil::runner::{Pbil, RunResult};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

mod command_line;

use command_line::cli::{Cli, Commands, CommonOptions};

/// Global allocator using `tikv-jemallocator`, which also backs the
/// post-run memory statistic.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Some(Commands::Solve { path, common }) => solve_file(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Generate {
            vars,
            clauses,
            clause_len,
            seed,
            output,
        }) => generate(vars, clauses, clause_len, seed, output.as_deref()),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_file(&path, &cli.common),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}

fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), Error> {
    let problem = parse_file(path)?;
    println!(
        "c {}: {} variables, {} clauses",
        path.display(),
        problem.num_vars(),
        problem.num_clauses()
    );

    let mut run = Pbil::new(&problem, common.to_config())?;
    if let Some(secs) = common.timeout_secs {
        run = run.with_timeout(Duration::from_secs(secs));
    }

    let result = if common.json {
        run.run_with(|snapshot| match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("error: failed to serialize snapshot: {err}"),
        })
    } else {
        run.run_with(|snapshot| {
            if snapshot.generation % 100 == 0 {
                println!(
                    "c generation {}: best {}/{}",
                    snapshot.generation, snapshot.best_ever_fitness, snapshot.max_fitness
                );
            }
        })
    };

    print_result(&problem, &result, common);
    Ok(())
}

fn solve_dir(dir: &Path, common: &CommonOptions) -> Result<(), Error> {
    let mut failures = 0_usize;

    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        let is_cnf = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("cnf"));
        if !is_cnf {
            continue;
        }

        if let Err(err) = solve_file(path, common) {
            eprintln!("error: {}: {err}", path.display());
            failures += 1;
        }
        println!();
    }

    if failures > 0 {
        eprintln!("{failures} instance(s) failed");
    }
    Ok(())
}

fn generate(
    vars: usize,
    clauses: usize,
    clause_len: usize,
    seed: Option<u64>,
    output: Option<&Path>,
) -> Result<(), Error> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let problem = Problem::random(vars, clauses, clause_len, &mut rng)?;

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            problem.write_dimacs(&mut file)?;
            file.flush()?;
            println!("wrote {} clauses over {} variables to {}", clauses, vars, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            problem.write_dimacs(&mut stdout.lock())?;
        }
    }
    Ok(())
}

fn print_result(problem: &Problem, result: &RunResult, common: &CommonOptions) {
    println!("s {}", result.state);
    println!(
        "o {}/{} clauses satisfied ({:.1}%)",
        result.fitness,
        result.max_fitness,
        result.success_ratio() * 100.0
    );

    if let Some(best) = &result.best_individual {
        if common.print_solution {
            println!("v {best}");
            let unsatisfied = unsatisfied_clauses(problem, best);
            if !unsatisfied.is_empty() {
                println!("c unsatisfied clauses: {unsatisfied:?}");
            }
        }
    }

    if common.stats {
        println!(
            "c generations: {} (best found at {})",
            result.generations_run, result.best_generation
        );
        println!("c elapsed: {:?}", result.elapsed);
        println!(
            "c probability vector: mean {:.3}, entropy {:.3}",
            result.probability_vector.mean(),
            result.probability_vector.entropy()
        );
        if result.clamp_events > 0 {
            println!("c clamped probability values: {}", result.clamp_events);
        }
        if let Some(allocated) = memory_allocated() {
            println!("c memory allocated: {:.2} MiB", allocated as f64 / 1024.0 / 1024.0);
        }
    }
}

/// Bytes currently allocated according to jemalloc, if the statistics are
/// readable.
fn memory_allocated() -> Option<usize> {
    epoch::advance().ok()?;
    stats::allocated::read().ok()
}
