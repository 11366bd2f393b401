//! Timetable solver CLI.
//!
//! Loads the catalog from a configuration directory, generates the session
//! workload, solves it (distributed across worker threads when the machine
//! allows, serially otherwise), and writes `schedule_output_0.json`.
//! Exits 0 on a complete schedule, 1 on failure.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::config;
use u_timetable::output;
use u_timetable::solver::{solve_distributed, LocalSolver};
use u_timetable::validation::validate_schedule;
use u_timetable::workload;

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Distributed greedy solver for weekly university timetables")]
struct Cli {
    /// Configuration directory holding the four catalog files.
    #[arg(default_value = "config")]
    config_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = config::load_catalog(&cli.config_dir)
        .with_context(|| format!("loading catalog from {}", cli.config_dir.display()))?;

    let mut sessions = workload::generate(&catalog);

    let workers = worker_count();
    let complete = if workers > 0 {
        solve_distributed(&catalog, &mut sessions, workers)?
    } else {
        LocalSolver::new(0).solve(&catalog, &mut sessions)?
    };

    if !complete {
        bail!("could not schedule every session; no feasible slot remained");
    }

    if let Err(violations) = validate_schedule(&catalog, &sessions) {
        for violation in &violations {
            warn!(kind = ?violation.kind, "{}", violation.message);
        }
        warn!(count = violations.len(), "schedule failed post-solve validation");
    }

    let out_path = Path::new("schedule_output_0.json");
    output::write_schedule(out_path, &sessions)
        .with_context(|| format!("writing {}", out_path.display()))?;

    info!(placed = sessions.len(), "done");
    Ok(())
}

/// Worker threads to spawn beside the coordinator. Zero means the machine
/// offers a single executor and the serial solver runs instead.
fn worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(0)
}
