//! Dispatch worker (rank >= 1).
//!
//! Repeatedly asks the coordinator for work, rebuilds the schedule snapshot
//! from the wire records, runs the placer on the task, and reports the
//! outcome. A `-2` header means work is still in flight elsewhere: back off
//! briefly and ask again. A `-1` header, or a closed fabric, ends the loop.

use std::thread;
use std::time::Duration;

use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::codec::{decode_i32, decode_session, encode_i32, encode_session, CodecError};
use crate::models::ClassSession;

use super::placer::Placer;
use super::proto::{MessageTag, WorkerEndpoint, TERMINATE, WAIT};

/// Backoff between retries when the coordinator has no task to hand out.
const RETRY_BACKOFF: Duration = Duration::from_millis(1);

/// Worker side of the distributed solve.
pub struct Worker<'a> {
    placer: Placer<'a>,
    endpoint: WorkerEndpoint,
}

impl<'a> Worker<'a> {
    /// Creates a worker over a catalog and its fabric endpoint.
    pub fn new(catalog: &'a Catalog, endpoint: WorkerEndpoint) -> Self {
        Self {
            placer: Placer::new(catalog),
            endpoint,
        }
    }

    /// Runs the request loop until the coordinator signals termination.
    ///
    /// A closed fabric is treated as termination: the coordinator drops its
    /// endpoint only after broadcasting the exit sentinel.
    pub fn run(self) -> Result<(), CodecError> {
        let rank = self.endpoint.rank();
        loop {
            if self
                .endpoint
                .send(MessageTag::WorkRequest, Vec::new())
                .is_err()
            {
                break;
            }

            let Ok(header) = self.endpoint.recv() else {
                break;
            };
            let num_scheduled = decode_i32(&header.payload)?;
            if num_scheduled == TERMINATE {
                break;
            }
            if num_scheduled == WAIT {
                thread::sleep(RETRY_BACKOFF);
                continue;
            }

            let Some((snapshot, mut task)) = self.receive_assignment(num_scheduled)? else {
                break;
            };

            let placed = match self.placer.try_place(&mut task, &snapshot) {
                Ok(placed) => placed,
                Err(e) => {
                    error!(rank, error = %e, "placement aborted");
                    false
                }
            };

            let flag = encode_i32(i32::from(placed)).to_vec();
            if self.endpoint.send(MessageTag::WorkResult, flag).is_err() {
                break;
            }
            if placed
                && self
                    .endpoint
                    .send(MessageTag::WorkResult, encode_session(&task))
                    .is_err()
            {
                break;
            }
        }

        debug!(rank, "worker exiting");
        Ok(())
    }

    /// Receives `num_scheduled` snapshot records and the task record.
    ///
    /// Returns `None` when the fabric closed mid-assignment.
    fn receive_assignment(
        &self,
        num_scheduled: i32,
    ) -> Result<Option<(Vec<ClassSession>, ClassSession)>, CodecError> {
        let mut snapshot = Vec::with_capacity(num_scheduled.max(0) as usize);
        for _ in 0..num_scheduled {
            let Ok(record) = self.endpoint.recv() else {
                return Ok(None);
            };
            snapshot.push(decode_session(&record.payload)?);
        }
        let Ok(task) = self.endpoint.recv() else {
            return Ok(None);
        };
        Ok(Some((snapshot, decode_session(&task.payload)?)))
    }
}
