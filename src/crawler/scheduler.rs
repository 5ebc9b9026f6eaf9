//! Scheduler for managing the crawl frontier and admission
//!
//! This module handles:
//! - The visited set, which every discovered URL passes through exactly once
//! - The FIFO queue of URLs waiting for a visit
//! - Global concurrency limiting via a semaphore

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};
use url::Url;

/// A URL waiting to be visited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: Url,

    /// Link hops from the seed
    pub depth: u32,
}

#[derive(Debug, Default)]
struct FrontierInner {
    visited: HashSet<String>,
    pending: VecDeque<QueuedUrl>,
}

/// Visited set plus pending queue, shared by all visits
///
/// Both live under one lock so that marking a URL visited and queueing it
/// happen together: two visits discovering the same URL at once queue it once.
#[derive(Debug, Default)]
pub struct Frontier {
    inner: Mutex<FrontierInner>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks `url` visited and queues it, unless it was already seen
    ///
    /// Returns true if the URL was new.
    pub fn mark_visited(&self, url: Url, depth: u32) -> bool {
        let mut inner = self.lock();
        if !inner.visited.insert(url.to_string()) {
            return false;
        }
        inner.pending.push_back(QueuedUrl { url, depth });
        true
    }

    /// Takes the oldest queued URL
    pub fn pop(&self) -> Option<QueuedUrl> {
        self.lock().pending.pop_front()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn visited_len(&self) -> usize {
        self.lock().visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().pending.is_empty()
    }
}

/// A queued URL that holds one of the crawl's concurrency slots
///
/// The slot frees when the permit is dropped.
pub struct ScheduledVisit {
    /// The URL to fetch
    pub url: QueuedUrl,

    /// The semaphore permit for this visit
    pub permit: OwnedSemaphorePermit,
}

/// Scheduler hands out queued URLs, at most `parallelism` at a time
pub struct Scheduler {
    /// Global semaphore for limiting concurrent visits
    permits: Arc<Semaphore>,

    frontier: Arc<Frontier>,

    parallelism: usize,
}

impl Scheduler {
    /// Creates a scheduler with `parallelism` slots and an empty frontier
    pub fn new(parallelism: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(parallelism)),
            frontier: Arc::new(Frontier::new()),
            parallelism,
        }
    }

    /// Shared handle to the frontier, for visits to queue what they find
    pub fn frontier(&self) -> Arc<Frontier> {
        Arc::clone(&self.frontier)
    }

    /// Gets the next URL to visit
    ///
    /// Returns `Ok(None)` straight away when nothing is queued. Otherwise
    /// waits for a free slot and returns the oldest queued URL with its permit.
    ///
    /// Only one caller may pop at a time; the coordinator is the only caller.
    pub async fn next_visit(&self) -> Result<Option<ScheduledVisit>, AcquireError> {
        if self.frontier.is_empty() {
            return Ok(None);
        }

        let permit = Arc::clone(&self.permits).acquire_owned().await?;
        Ok(self
            .frontier
            .pop()
            .map(|url| ScheduledVisit { url, permit }))
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Number of visits currently holding a slot
    pub fn active(&self) -> usize {
        self.parallelism
            .saturating_sub(self.permits.available_permits())
    }
}
