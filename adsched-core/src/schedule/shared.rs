//! Serialized scheduler handle for multi-threaded hosts.
//!
//! Collaborator callbacks arrive from whatever execution context the
//! ad network and the rendering surface use. This wrapper funnels them
//! all through one mutex so exactly one state transition is in flight
//! at a time, and owns the clock so each entry point evaluates its
//! guards against a single `now` sample taken before the lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::clock::{Clock, WallClock};
use crate::errors::{FetchError, PresentError, ProtocolViolation};
use crate::inventory::InventorySource;
use crate::surface::PresentationSurface;

use super::scheduler::AdScheduler;
use super::types::{Phase, SchedulerStats, SchedulerStatus};

/// Cloneable, thread-safe handle to an [`AdScheduler`].
///
/// Collaborators MUST NOT call back synchronously from inside a
/// dispatch (`begin_fetch` / `present`) — the dispatch runs under the
/// lock and the lock is not reentrant. Both collaborator contracts
/// already require asynchronous resolution.
#[derive(Debug)]
pub struct SharedAdScheduler<A, F, S, C = WallClock> {
    inner: Arc<Mutex<AdScheduler<A, F, S>>>,
    clock: Arc<C>,
}

impl<A, F, S, C> Clone for SharedAdScheduler<A, F, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, F, S> SharedAdScheduler<A, F, S, WallClock>
where
    F: InventorySource,
    S: PresentationSurface<A>,
{
    /// Wraps `scheduler` with a fresh wall clock.
    pub fn new(scheduler: AdScheduler<A, F, S>) -> Self {
        Self::with_clock(scheduler, WallClock::new())
    }
}

impl<A, F, S, C> SharedAdScheduler<A, F, S, C>
where
    F: InventorySource,
    S: PresentationSurface<A>,
    C: Clock,
{
    /// Wraps `scheduler` with an explicit clock (virtual in tests).
    pub fn with_clock(scheduler: AdScheduler<A, F, S>, clock: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
            clock: Arc::new(clock),
        }
    }

    // A panic inside a collaborator dispatch poisons the lock, but
    // every transition writes its fields before dispatching, so the
    // machine behind a poisoned lock is still coherent. Recover it.
    fn lock(&self) -> MutexGuard<'_, AdScheduler<A, F, S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`AdScheduler::request_load`].
    pub fn request_load(&self) {
        let now = self.clock.now();
        self.lock().request_load(now);
    }

    /// See [`AdScheduler::on_foreground`].
    pub fn on_foreground(&self, surface: S) {
        let now = self.clock.now();
        self.lock().on_foreground(surface, now);
    }

    /// See [`AdScheduler::on_load_succeeded`].
    pub fn on_load_succeeded(&self, unit: A) -> Result<(), ProtocolViolation> {
        let now = self.clock.now();
        self.lock().on_load_succeeded(unit, now)
    }

    /// See [`AdScheduler::on_load_failed`].
    pub fn on_load_failed(&self, reason: &FetchError) -> Result<(), ProtocolViolation> {
        let now = self.clock.now();
        self.lock().on_load_failed(reason, now)
    }

    /// See [`AdScheduler::on_presentation_started`].
    pub fn on_presentation_started(&self) -> Result<(), ProtocolViolation> {
        let now = self.clock.now();
        self.lock().on_presentation_started(now)
    }

    /// See [`AdScheduler::on_presentation_dismissed`].
    pub fn on_presentation_dismissed(&self) -> Result<(), ProtocolViolation> {
        let now = self.clock.now();
        self.lock().on_presentation_dismissed(now)
    }

    /// See [`AdScheduler::on_presentation_failed`].
    pub fn on_presentation_failed(&self, reason: &PresentError) -> Result<(), ProtocolViolation> {
        let now = self.clock.now();
        self.lock().on_presentation_failed(reason, now)
    }

    /// See [`AdScheduler::is_inventory_ready`].
    #[must_use]
    pub fn is_inventory_ready(&self) -> bool {
        let now = self.clock.now();
        self.lock().is_inventory_ready(now)
    }

    /// See [`AdScheduler::is_presenting`].
    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.lock().is_presenting()
    }

    /// See [`AdScheduler::phase`].
    #[must_use]
    pub fn phase(&self) -> Phase {
        let now = self.clock.now();
        self.lock().phase(now)
    }

    /// See [`AdScheduler::status`].
    #[must_use]
    pub fn status(&self) -> SchedulerStatus {
        let now = self.clock.now();
        self.lock().status(now)
    }

    /// See [`AdScheduler::stats`].
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.lock().stats()
    }
}
