//! Greedy constraint solvers for the generated workload.
//!
//! Two drivers share one placement engine:
//!
//! - [`LocalSolver`]: a single shuffled greedy pass, the serial reference
//!   semantics.
//! - [`solve_distributed`]: a coordinator plus worker threads exchanging
//!   codec-framed messages over the [`proto`] fabric. The coordinator
//!   snapshots its schedule into each assignment and re-verifies results
//!   on commit, so the final schedule is conflict-free regardless of how
//!   worker results interleave.
//!
//! Both abort on the first unplaceable session; there is no backtracking.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4:
//! greedy dispatching.

mod coordinator;
mod local;
mod placer;
pub mod proto;
mod worker;

use std::thread;

use thiserror::Error;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::codec::CodecError;
use crate::models::ClassSession;

pub use coordinator::Coordinator;
pub use local::LocalSolver;
pub use placer::Placer;
pub use worker::Worker;

use proto::FabricClosed;

/// Fatal solver error.
///
/// Ordinary infeasibility is a boolean outcome, not an error; these are the
/// conditions under which the search itself cannot proceed.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A workload session references a group missing from the catalog, so
    /// its effective size cannot be computed.
    #[error("unknown group {0:?} in workload")]
    UnknownGroup(String),
    /// A wire record failed to decode.
    #[error("wire decode failed: {0}")]
    Codec(#[from] CodecError),
    /// The fabric disconnected while the coordinator was still running.
    #[error(transparent)]
    Fabric(#[from] FabricClosed),
}

/// Shuffle seed for a rank. Rank 0 is the coordinator's dispatch order;
/// higher ranks give stand-alone local solvers distinct orders.
pub(crate) fn shuffle_seed(rank: usize) -> u64 {
    rank as u64 + 1
}

/// Solves the workload with one coordinator and `worker_count` worker
/// threads.
///
/// On success `sessions` is replaced by the placed schedule and `true` is
/// returned; `false` means some session could not be placed. The catalog is
/// shared read-only across all threads.
pub fn solve_distributed(
    catalog: &Catalog,
    sessions: &mut Vec<ClassSession>,
    worker_count: usize,
) -> Result<bool, SolveError> {
    let worker_count = worker_count.max(1);
    info!(workers = worker_count, sessions = sessions.len(), "distributed solve starting");

    let (coordinator_endpoint, worker_endpoints) = proto::fabric(worker_count);
    let pending = std::mem::take(sessions);

    let outcome = thread::scope(|scope| {
        for endpoint in worker_endpoints {
            let worker = Worker::new(catalog, endpoint);
            scope.spawn(move || {
                if let Err(e) = worker.run() {
                    error!(error = %e, "worker wire failure");
                }
            });
        }
        Coordinator::new(catalog, coordinator_endpoint, pending).run()
    })?;

    match outcome {
        Some(scheduled) => {
            *sessions = scheduled;
            Ok(true)
        }
        None => Ok(false),
    }
}
