//! Message-passing fabric for the coordinator/worker protocol.
//!
//! Models a rank-addressed, tagged point-to-point fabric over `std::sync::mpsc`:
//! workers share one many-producer inbox into the coordinator, and the
//! coordinator owns one reply channel per worker. Channels deliver in order
//! per sender, which is the ordering guarantee the protocol relies on.
//!
//! Every payload is a raw byte vector: a 4-byte little-endian integer
//! (headers, flags, sentinels) or one session record from the codec. The
//! coordinator endpoint keeps a stash queue so tag-selective probe and
//! receive can be expressed over the single inbox.

use std::collections::VecDeque;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use thiserror::Error;

/// Header sentinel: no more work, terminate.
pub const TERMINATE: i32 = -1;
/// Header sentinel: no task available right now, retry.
pub const WAIT: i32 = -2;

/// Message tags of the dispatch protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTag {
    /// Worker asks the coordinator for a task.
    WorkRequest,
    /// Coordinator ships a header, snapshot records, and a task.
    WorkAssign,
    /// Worker reports an outcome flag, then the placed record on success.
    WorkResult,
}

/// One tagged message on the fabric.
#[derive(Debug)]
pub struct Envelope {
    /// Sender rank (0 = coordinator).
    pub source: usize,
    /// Protocol tag.
    pub tag: MessageTag,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

/// The fabric shut down while a receive was outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("message fabric disconnected")]
pub struct FabricClosed;

/// Coordinator side of the fabric.
pub struct CoordinatorEndpoint {
    inbox: Receiver<Envelope>,
    replies: Vec<Sender<Envelope>>,
    stash: VecDeque<Envelope>,
}

/// Worker side of the fabric.
pub struct WorkerEndpoint {
    rank: usize,
    inbox: Receiver<Envelope>,
    outbox: Sender<Envelope>,
}

/// Builds a fabric connecting one coordinator to `worker_count` workers
/// with ranks `1..=worker_count`.
pub fn fabric(worker_count: usize) -> (CoordinatorEndpoint, Vec<WorkerEndpoint>) {
    let (to_coordinator, inbox) = channel();
    let mut replies = Vec::with_capacity(worker_count);
    let mut workers = Vec::with_capacity(worker_count);

    for rank in 1..=worker_count {
        let (reply_tx, reply_rx) = channel();
        replies.push(reply_tx);
        workers.push(WorkerEndpoint {
            rank,
            inbox: reply_rx,
            outbox: to_coordinator.clone(),
        });
    }

    (
        CoordinatorEndpoint {
            inbox,
            replies,
            stash: VecDeque::new(),
        },
        workers,
    )
}

impl CoordinatorEndpoint {
    /// Number of workers attached to this fabric.
    pub fn worker_count(&self) -> usize {
        self.replies.len()
    }

    /// Sends a message to a worker rank.
    ///
    /// A send to a worker that already exited is dropped; the protocol only
    /// does this during termination sweeps.
    pub fn send(&self, rank: usize, tag: MessageTag, payload: Vec<u8>) {
        let envelope = Envelope {
            source: 0,
            tag,
            payload,
        };
        let _ = self.replies[rank - 1].send(envelope);
    }

    /// Non-blocking probe: removes and returns the first queued message
    /// with the given tag, if any.
    pub fn probe(&mut self, tag: MessageTag) -> Option<Envelope> {
        self.drain_inbox();
        let index = self.stash.iter().position(|env| env.tag == tag)?;
        self.stash.remove(index)
    }

    /// Blocking receive of the next message with the given tag from any
    /// worker. Messages with other tags are stashed for later probes.
    pub fn recv_tagged(&mut self, tag: MessageTag) -> Result<Envelope, FabricClosed> {
        self.recv_matching(|env| env.tag == tag)
    }

    /// Blocking receive of the next message with the given tag from one
    /// specific worker.
    pub fn recv_from(&mut self, source: usize, tag: MessageTag) -> Result<Envelope, FabricClosed> {
        self.recv_matching(|env| env.source == source && env.tag == tag)
    }

    fn recv_matching(
        &mut self,
        matches: impl Fn(&Envelope) -> bool,
    ) -> Result<Envelope, FabricClosed> {
        if let Some(index) = self.stash.iter().position(&matches) {
            return self.stash.remove(index).ok_or(FabricClosed);
        }
        loop {
            let envelope = self.inbox.recv().map_err(|_| FabricClosed)?;
            if matches(&envelope) {
                return Ok(envelope);
            }
            self.stash.push_back(envelope);
        }
    }

    fn drain_inbox(&mut self) {
        loop {
            match self.inbox.try_recv() {
                Ok(envelope) => self.stash.push_back(envelope),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return,
            }
        }
    }
}

impl WorkerEndpoint {
    /// This worker's rank.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Sends a message to the coordinator.
    pub fn send(&self, tag: MessageTag, payload: Vec<u8>) -> Result<(), FabricClosed> {
        self.outbox
            .send(Envelope {
                source: self.rank,
                tag,
                payload,
            })
            .map_err(|_| FabricClosed)
    }

    /// Blocking receive of the next coordinator message.
    pub fn recv(&self) -> Result<Envelope, FabricClosed> {
        self.inbox.recv().map_err(|_| FabricClosed)
    }
}
