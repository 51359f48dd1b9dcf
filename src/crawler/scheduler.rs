//! Bounded worker pool for fetches
//!
//! This module handles:
//! - Global concurrency limiting via a counting semaphore
//! - Spawning one worker task per in-flight fetch
//! - Carrying completed fetches back to the coordinator over one channel
//!
//! The semaphore does double duty: besides limiting concurrency, "every
//! permit available" means no fetch is in flight and no outcome is queued.
//! A worker never releases its permit itself; the permit travels inside the
//! completion message and is released when the coordinator takes that
//! message off the queue. While the coordinator waits for a slot it keeps
//! taking messages off the queue, parking their outcomes until they are
//! asked for, so queued permits can always be reclaimed. A full semaphore
//! with nothing parked means there is nothing left to wait for.
//!
//! That reading is only sound while a single coordinator is the sole task
//! that acquires permits and the sole consumer of the completion channel.

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::CartographerError;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};
use url::Url;

/// A finished fetch together with the slot it occupied
struct Completion {
    outcome: FetchOutcome,
    permit: OwnedSemaphorePermit,
}

/// Scheduler owns fetch slots and the completion queue
pub struct Scheduler {
    /// One permit per fetch slot
    slots: Arc<Semaphore>,

    /// Number of slots the semaphore started with
    capacity: usize,

    fetcher: Fetcher,

    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,

    /// Outcomes taken off the queue while waiting for a slot
    parked: VecDeque<FetchOutcome>,
}

impl Scheduler {
    /// Creates a scheduler with `capacity` slots, all initially free
    pub fn new(capacity: usize, fetcher: Fetcher) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
            fetcher,
            completions_tx,
            completions_rx,
            parked: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of fetch slots currently taken, by running fetches or by
    /// outcomes still in the queue
    pub fn in_flight(&self) -> usize {
        self.capacity - self.slots.available_permits()
    }

    /// Returns true when no fetch is running and no outcome is pending
    pub fn is_quiescent(&self) -> bool {
        self.slots.available_permits() == self.capacity && self.parked.is_empty()
    }

    /// Waits for a free slot
    ///
    /// This is the only backpressure point: when all slots are taken the
    /// coordinator suspends here until a worker finishes. Outcomes arriving
    /// meanwhile are parked and their slots released.
    pub async fn acquire(&mut self) -> Result<OwnedSemaphorePermit, CartographerError> {
        let slots = self.slots.clone();

        loop {
            tokio::select! {
                permit = slots.clone().acquire_owned() => {
                    return permit.map_err(|_| CartographerError::SchedulerClosed(self.in_flight()));
                }
                completion = self.completions_rx.recv() => match completion {
                    Some(Completion { outcome, permit }) => {
                        drop(permit);
                        self.parked.push_back(outcome);
                    }
                    None => return Err(CartographerError::SchedulerClosed(self.in_flight())),
                },
            }
        }
    }

    /// Starts a worker that fetches `url` while holding `permit`
    ///
    /// The worker sends exactly one outcome and hands its permit over with
    /// it, so the slot stays taken until the coordinator receives the
    /// outcome. A panic inside the fetch is reported as an abandoned URL.
    pub fn spawn(&self, url: Url, permit: OwnedSemaphorePermit) {
        let fetcher = self.fetcher.clone();
        let completions = self.completions_tx.clone();

        tokio::spawn(async move {
            let fetch = tokio::spawn({
                let url = url.clone();
                async move { fetcher.fetch(url).await }
            });

            let outcome = match fetch.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Fetch task for {} failed: {}", url, e);
                    FetchOutcome::Abandoned(url)
                }
            };

            if completions.send(Completion { outcome, permit }).is_err() {
                tracing::debug!("Completion queue closed; dropping fetch outcome");
            }
        });
    }

    /// Waits for the next completed fetch, in arrival order
    ///
    /// The fetch's slot is released here, before the outcome is returned.
    pub async fn next_completion(&mut self) -> Result<FetchOutcome, CartographerError> {
        if let Some(outcome) = self.parked.pop_front() {
            return Ok(outcome);
        }

        let in_flight = self.in_flight();
        let Completion { outcome, permit } = self
            .completions_rx
            .recv()
            .await
            .ok_or(CartographerError::SchedulerClosed(in_flight))?;
        drop(permit);
        Ok(outcome)
    }
}
