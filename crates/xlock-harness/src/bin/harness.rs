//! CLI entrypoint for the X-Lock conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use xlock_harness::structured_log::{LogEmitter, LogLevel, Outcome};
use xlock_harness::{ScenarioResult, run_all};

/// Conformance tooling for X-Lock.
#[derive(Debug, Parser)]
#[command(name = "xlock-harness")]
#[command(about = "Runs the fixed-vector end-to-end scenarios against xlock-core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run all fixed-vector scenarios and print a pass/fail summary.
    Run {
        /// Number of independent trials for the noisy reproduction scenario.
        #[arg(long, default_value_t = 1000)]
        noisy_trials: usize,
        /// Optional JSONL structured-log output path; stdout if omitted.
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

fn report(results: &[ScenarioResult], mut emitter: LogEmitter) -> std::io::Result<bool> {
    let mut all_passed = true;
    for r in results {
        if !r.passed {
            all_passed = false;
        }
        let level = if r.passed { LogLevel::Info } else { LogLevel::Error };
        let outcome = if r.passed { Outcome::Pass } else { Outcome::Fail };
        emitter.emit(level, r.name, Some(outcome), Some(r.details.clone()))?;
        println!(
            "[{}] {}",
            if r.passed { "PASS" } else { "FAIL" },
            r.name
        );
    }
    Ok(all_passed)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run { noisy_trials, log } => {
            let results = run_all(noisy_trials);
            let emitter = match log {
                Some(path) => match LogEmitter::to_file(&path) {
                    Ok(e) => e,
                    Err(e) => {
                        eprintln!("failed to open log file {}: {e}", path.display());
                        return ExitCode::FAILURE;
                    }
                },
                None => LogEmitter::to_stdout(),
            };
            match report(&results, emitter) {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(e) => {
                    eprintln!("failed to write structured log: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
