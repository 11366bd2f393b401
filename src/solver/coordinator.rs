//! Dispatch coordinator (rank 0).
//!
//! Owns the pending workload and the growing schedule. Each loop iteration
//! commits every result already queued, then serves one work request: the
//! requesting worker gets the current schedule snapshot plus one pending
//! session, all as codec records. Sentinel headers tell workers to retry
//! (`-2`, work in flight but none to hand out) or exit (`-1`).
//!
//! Workers place against point-in-time snapshots, so two of them can race
//! the same slot. Incoming results are therefore re-verified against the
//! current schedule before committing; a result that no longer fits is
//! stripped of its placement and requeued. That keeps the final schedule
//! conflict-free under any worker count without backtracking.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::codec::{decode_i32, decode_session, encode_i32, encode_session};
use crate::models::ClassSession;
use crate::verifier::is_slot_free;

use super::proto::{CoordinatorEndpoint, Envelope, MessageTag, TERMINATE, WAIT};
use super::{shuffle_seed, SolveError};

/// Master side of the distributed solve.
pub struct Coordinator<'a> {
    catalog: &'a Catalog,
    endpoint: CoordinatorEndpoint,
    pending: Vec<ClassSession>,
    scheduled: Vec<ClassSession>,
    next_idx: usize,
    in_flight: usize,
    completed: usize,
    total: usize,
    active: Vec<bool>,
}

impl<'a> Coordinator<'a> {
    /// Creates a coordinator over a shuffled copy of the workload.
    pub fn new(
        catalog: &'a Catalog,
        endpoint: CoordinatorEndpoint,
        mut pending: Vec<ClassSession>,
    ) -> Self {
        let mut rng = SmallRng::seed_from_u64(shuffle_seed(0));
        pending.shuffle(&mut rng);

        let total = pending.len();
        let active = vec![true; endpoint.worker_count()];
        Self {
            catalog,
            endpoint,
            pending,
            scheduled: Vec::with_capacity(total),
            next_idx: 0,
            in_flight: 0,
            completed: 0,
            total,
            active,
        }
    }

    /// Runs the dispatch loop to completion.
    ///
    /// Returns the finished schedule, or `None` when any worker reported an
    /// unplaceable session. Every exit path tells all still-live workers to
    /// terminate.
    pub fn run(mut self) -> Result<Option<Vec<ClassSession>>, SolveError> {
        let outcome = self.drive();
        self.broadcast_terminate();
        match outcome? {
            true => {
                info!(placed = self.scheduled.len(), "schedule complete");
                Ok(Some(self.scheduled))
            }
            false => Ok(None),
        }
    }

    fn drive(&mut self) -> Result<bool, SolveError> {
        while self.completed < self.total {
            if !self.drain_results()? {
                debug!("worker reported an unplaceable session");
                return Ok(false);
            }
            if self.completed == self.total {
                break;
            }

            let request = self.endpoint.recv_tagged(MessageTag::WorkRequest)?;
            // A worker sends its result before its next request, and the
            // fabric preserves per-sender order, so any result outrun by
            // this request is already queued. Committing those first keeps
            // snapshots fresh and makes the single-worker run exactly
            // sequential.
            if !self.drain_results()? {
                debug!("worker reported an unplaceable session");
                return Ok(false);
            }
            self.handle_request(request.source);
        }
        Ok(true)
    }

    /// Commits every result already queued. Returns `Ok(false)` on a
    /// reported failure.
    fn drain_results(&mut self) -> Result<bool, SolveError> {
        while let Some(result) = self.endpoint.probe(MessageTag::WorkResult) {
            if !self.handle_result(result)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Consumes one result. Returns `Ok(false)` when the worker reported
    /// failure, which aborts the whole solve.
    fn handle_result(&mut self, result: Envelope) -> Result<bool, SolveError> {
        let source = result.source;
        let success = decode_i32(&result.payload)? != 0;
        self.in_flight -= 1;

        if !success {
            return Ok(false);
        }

        let record = self.endpoint.recv_from(source, MessageTag::WorkResult)?;
        let session = decode_session(&record.payload)?;

        // The worker placed against a snapshot; the schedule may have grown
        // since. Only commit if the slot still holds.
        if is_slot_free(
            self.catalog,
            &self.scheduled,
            &session,
            &session.day,
            &session.start_time,
            &session.end_time,
        ) {
            self.scheduled.push(session);
            self.completed += 1;
            debug!(
                completed = self.completed,
                total = self.total,
                worker = source,
                "session committed"
            );
        } else {
            debug!(
                subject = %session.subject_name,
                group = %session.group_id,
                worker = source,
                "stale placement; session requeued"
            );
            let mut session = session;
            session.clear_assignment();
            self.pending.push(session);
        }
        Ok(true)
    }

    /// Serves one work request from `rank`.
    fn handle_request(&mut self, rank: usize) {
        if self.next_idx < self.pending.len() {
            let count = self.scheduled.len() as i32;
            self.endpoint
                .send(rank, MessageTag::WorkAssign, encode_i32(count).to_vec());
            for session in &self.scheduled {
                self.endpoint
                    .send(rank, MessageTag::WorkAssign, encode_session(session));
            }
            let task = &self.pending[self.next_idx];
            self.endpoint
                .send(rank, MessageTag::WorkAssign, encode_session(task));
            self.next_idx += 1;
            self.in_flight += 1;
        } else if self.in_flight > 0 {
            self.endpoint
                .send(rank, MessageTag::WorkAssign, encode_i32(WAIT).to_vec());
        } else {
            self.endpoint
                .send(rank, MessageTag::WorkAssign, encode_i32(TERMINATE).to_vec());
            self.active[rank - 1] = false;
        }
    }

    fn broadcast_terminate(&mut self) {
        for rank in 1..=self.active.len() {
            if self.active[rank - 1] {
                self.endpoint
                    .send(rank, MessageTag::WorkAssign, encode_i32(TERMINATE).to_vec());
                self.active[rank - 1] = false;
            }
        }
    }
}
