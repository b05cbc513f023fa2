//! Source distance caches and the background worker that recomputes them.
//!
//! Every change to the active-wave set bumps a request generation and hands
//! the worker a snapshot of `(WaveId, source index)` pairs. The worker runs at
//! most one recompute at a time; requests arriving meanwhile overwrite the
//! pending slot, so a burst of mutations costs one extra pass rather than one
//! thread each. Finished tables land in a mailbox that the render thread
//! drains without blocking.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use glam::DVec2;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace, warn};

use crate::error::{FieldError, Result};

/// Identifier of one wave activation, unique for an engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaveId(pub u64);

/// Distances from one oscillator to each source of a wave snapshot.
///
/// Entries are sorted by `WaveId`. A missing entry means the distance is not
/// known yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistanceCache {
    entries: Vec<(WaveId, f64)>,
}

impl DistanceCache {
    pub fn from_entries(mut entries: Vec<(WaveId, f64)>) -> Self {
        entries.sort_by_key(|(id, _)| *id);
        Self { entries }
    }

    /// Distance to the source of `id`, if this cache covers it.
    pub fn get(&self, id: WaveId) -> Option<f64> {
        self.entries
            .binary_search_by_key(&id, |(entry_id, _)| *entry_id)
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaveId, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// One complete recompute result: a cache per lattice point.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    generation: u64,
    caches: Vec<DistanceCache>,
}

impl DistanceTable {
    pub fn new(generation: u64, caches: Vec<DistanceCache>) -> Self {
        Self { generation, caches }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }

    pub fn into_caches(self) -> Vec<DistanceCache> {
        self.caches
    }
}

/// Snapshot of the active sources at the time of a mutation.
#[derive(Debug, Clone)]
pub struct RecomputeRequest {
    pub generation: u64,
    pub sources: Vec<(WaveId, usize)>,
}

/// Compute planar distances from every position to every requested source.
pub fn compute_table(positions: &[DVec2], request: &RecomputeRequest) -> DistanceTable {
    let origins: Vec<(WaveId, DVec2)> = request
        .sources
        .iter()
        .filter_map(|&(id, source)| positions.get(source).map(|p| (id, *p)))
        .collect();

    let caches = positions
        .iter()
        .map(|position| {
            DistanceCache::from_entries(
                origins
                    .iter()
                    .map(|(id, origin)| (*id, position.distance(*origin)))
                    .collect(),
            )
        })
        .collect();

    DistanceTable::new(request.generation, caches)
}

#[derive(Default)]
struct RequestSlot {
    pending: Option<RecomputeRequest>,
    shutdown: bool,
}

#[derive(Default)]
struct Mailbox {
    table: Option<DistanceTable>,
    /// Highest generation the worker has finished
    completed: u64,
}

#[derive(Default)]
struct Shared {
    requests: Mutex<RequestSlot>,
    wake: Condvar,
    mailbox: Mutex<Mailbox>,
    published: Condvar,
}

/// Handle to the background distance recompute thread.
///
/// Dropping the handle signals the thread and joins it; a pending request is
/// abandoned.
pub struct DistanceWorker {
    shared: Arc<Shared>,
    handle: Option<thread::JoinHandle<()>>,
}

impl DistanceWorker {
    /// Spawn the worker over a fixed set of oscillator positions.
    pub fn spawn(positions: Vec<DVec2>) -> Result<Self> {
        let shared = Arc::new(Shared::default());
        let worker_shared = Arc::clone(&shared);

        let handle = thread::Builder::new()
            .name("distance-recompute".to_string())
            .spawn(move || run_worker(positions, worker_shared))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Queue a recompute, replacing any request that has not started yet.
    pub fn submit(&self, request: RecomputeRequest) {
        let mut slot = self.shared.requests.lock();
        if let Some(superseded) = slot.pending.replace(request) {
            trace!(generation = superseded.generation, "coalesced pending recompute");
        }
        self.shared.wake.notify_one();
    }

    /// Take the latest published table without blocking.
    ///
    /// Returns `None` when nothing new is published or the mailbox is
    /// momentarily held by the worker.
    pub fn try_take(&self) -> Option<DistanceTable> {
        self.shared.mailbox.try_lock()?.table.take()
    }

    /// Block until `generation` has been published, then take the newest table.
    ///
    /// Returns `Ok(None)` if the newest table was already taken.
    pub fn wait_for(&self, generation: u64, timeout: Duration) -> Result<Option<DistanceTable>> {
        let deadline = Instant::now() + timeout;
        let mut mailbox = self.shared.mailbox.lock();
        while mailbox.completed < generation {
            if self
                .shared
                .published
                .wait_until(&mut mailbox, deadline)
                .timed_out()
                && mailbox.completed < generation
            {
                warn!(
                    generation,
                    completed = mailbox.completed,
                    "distance recompute timed out"
                );
                return Err(FieldError::RecomputeTimeout(timeout));
            }
        }
        Ok(mailbox.table.take())
    }
}

impl Drop for DistanceWorker {
    fn drop(&mut self) {
        self.shared.requests.lock().shutdown = true;
        self.shared.wake.notify_all();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_worker(positions: Vec<DVec2>, shared: Arc<Shared>) {
    debug!(points = positions.len(), "distance worker started");

    loop {
        let request = {
            let mut slot = shared.requests.lock();
            loop {
                if slot.shutdown {
                    debug!("distance worker stopped");
                    return;
                }
                if let Some(request) = slot.pending.take() {
                    break request;
                }
                shared.wake.wait(&mut slot);
            }
        };

        let table = compute_table(&positions, &request);

        let mut mailbox = shared.mailbox.lock();
        mailbox.completed = mailbox.completed.max(request.generation);
        mailbox.table = Some(table);
        shared.published.notify_all();
        trace!(
            generation = request.generation,
            waves = request.sources.len(),
            "published distance table"
        );
    }
}
