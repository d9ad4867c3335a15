//! The ad scheduler — event-driven freshness and frequency policy.
//!
//! All state lives in one exclusively-owned struct and is mutated only
//! through the entry points below, each of which takes a single
//! sampled `now` so every guard for one decision observes the same
//! instant. Expiry is lazy: staleness is checked only when a decision
//! is made, never on a background timer. Retry is purely event-driven:
//! nothing in this module schedules future work.

use tracing::{debug, warn};

use crate::clock::Time;
use crate::errors::{FetchError, PresentError, ProtocolViolation};
use crate::inventory::InventorySource;
use crate::surface::PresentationSurface;

use super::types::{Phase, SchedulerConfig, SchedulerStats, SchedulerStatus};

/// Ad-display scheduler.
///
/// Generic over the opaque ad unit `A`, the inventory source `F`, and
/// the presentation surface `S`. The scheduler owns its source for its
/// whole lifetime; surfaces are transient and re-captured on every
/// foreground event.
///
/// Every entry point takes `&mut self`: exactly one state transition
/// can be in flight at a time by ownership alone. Hosts whose
/// collaborator callbacks arrive on arbitrary threads should wrap the
/// scheduler in [`SharedAdScheduler`](super::SharedAdScheduler).
///
/// A fresh scheduler starts in `Idle` with no inventory and no show
/// history; nothing is persisted across process restarts. Teardown is
/// plain `drop` — an in-flight fetch or presentation cannot be
/// recalled, its eventual callback simply has nowhere to land.
#[derive(Debug)]
pub struct AdScheduler<A, F, S> {
    config: SchedulerConfig,
    source: F,
    surface: Option<S>,
    inventory: Option<A>,
    /// Meaningful only while `inventory` is `Some`.
    loaded_at: Time,
    last_shown_at: Option<Time>,
    fetch_in_flight: bool,
    presenting: bool,
    stats: SchedulerStats,
}

impl<A, F, S> AdScheduler<A, F, S>
where
    F: InventorySource,
    S: PresentationSurface<A>,
{
    /// Creates an idle scheduler owning `source`, with the given
    /// policy.
    pub fn new(source: F, config: SchedulerConfig) -> Self {
        Self {
            config,
            source,
            surface: None,
            inventory: None,
            loaded_at: Time::ZERO,
            last_shown_at: None,
            fetch_in_flight: false,
            presenting: false,
            stats: SchedulerStats::default(),
        }
    }

    /// Creates an idle scheduler with the default 4 h / 4 h policy.
    pub fn with_default_config(source: F) -> Self {
        Self::new(source, SchedulerConfig::default())
    }

    // ─── Decision entry points ─────────────────────────────────────

    /// Request that inventory be made ready.
    ///
    /// Guard-and-dispatch: a no-op while a fetch is outstanding or
    /// while fresh inventory is already held. Otherwise discards any
    /// stale inventory and dispatches exactly one fetch. Never queues
    /// a second request behind an in-flight one — the resolution
    /// callbacks drive re-invocation.
    pub fn request_load(&mut self, now: Time) {
        if self.fetch_in_flight {
            debug!("load request ignored, fetch already in flight");
            return;
        }
        if self.inventory_fresh(now) {
            debug!("load request ignored, fresh inventory already held");
            return;
        }
        if self.inventory.take().is_some() {
            self.stats.inventory_expired += 1;
            debug!("discarding inventory that aged past ttl");
        }
        self.fetch_in_flight = true;
        self.stats.fetches_dispatched += 1;
        debug!("dispatching inventory fetch");
        self.source.begin_fetch();
    }

    /// Foreground transition with the currently active surface.
    ///
    /// Always re-captures the surface, then runs the show decision:
    /// never interrupts an active presentation, primes a fetch when no
    /// fresh inventory is held, suppresses while the frequency gate is
    /// closed, and otherwise delegates to the surface.
    pub fn on_foreground(&mut self, surface: S, now: Time) {
        self.surface = Some(surface);

        if self.presenting {
            debug!("foreground ignored, presentation already on screen");
            return;
        }
        if !self.inventory_fresh(now) {
            self.request_load(now);
            return;
        }
        if !self.frequency_gate_open(now) {
            debug!("show suppressed, minimum interval since last show not elapsed");
            return;
        }

        // Both are Some here: the surface was captured above and the
        // freshness check requires held inventory.
        if let (Some(surface), Some(unit)) = (self.surface.as_mut(), self.inventory.as_ref()) {
            self.presenting = true;
            self.stats.presentations_dispatched += 1;
            debug!("delegating presentation to foreground surface");
            surface.present(unit);
        }
    }

    // ─── Inventory source callbacks ────────────────────────────────

    /// Resolution of a dispatched fetch: success.
    ///
    /// Installs `unit` as held inventory, stamped with `now`. A
    /// success with no fetch in flight is a collaborator protocol
    /// violation: logged, ignored, state untouched.
    pub fn on_load_succeeded(&mut self, unit: A, now: Time) -> Result<(), ProtocolViolation> {
        if !self.fetch_in_flight {
            return Err(self.anomaly(ProtocolViolation::LoadSuccessWithoutFetch));
        }
        self.inventory = Some(unit);
        self.loaded_at = now;
        self.fetch_in_flight = false;
        debug!("inventory loaded");
        Ok(())
    }

    /// Resolution of a dispatched fetch: failure.
    ///
    /// Clears the in-flight flag and does not retry; the next
    /// lifecycle event drives the retry, which bounds the retry rate
    /// to the natural rate of app usage.
    pub fn on_load_failed(
        &mut self,
        reason: &FetchError,
        _now: Time,
    ) -> Result<(), ProtocolViolation> {
        if !self.fetch_in_flight {
            return Err(self.anomaly(ProtocolViolation::LoadFailureWithoutFetch));
        }
        self.inventory = None;
        self.fetch_in_flight = false;
        self.stats.fetch_failures += 1;
        warn!(%reason, "inventory fetch failed, retry deferred to next lifecycle event");
        Ok(())
    }

    // ─── Presentation surface callbacks ────────────────────────────

    /// The surface confirmed it began rendering.
    ///
    /// Idempotent reaffirmation of the presenting flag, counted as a
    /// confirmed impression for observability. No other state effect.
    pub fn on_presentation_started(&mut self, _now: Time) -> Result<(), ProtocolViolation> {
        if !self.presenting {
            return Err(self.anomaly(ProtocolViolation::StartedWithoutPresentation));
        }
        self.stats.impressions_confirmed += 1;
        debug!("presentation confirmed on screen");
        Ok(())
    }

    /// The user dismissed the shown ad.
    ///
    /// Records the show completion for the frequency gate, discards
    /// the shown unit, and immediately primes the next fetch.
    pub fn on_presentation_dismissed(&mut self, now: Time) -> Result<(), ProtocolViolation> {
        if !self.presenting {
            return Err(self.anomaly(ProtocolViolation::DismissedWithoutPresentation));
        }
        self.inventory = None;
        self.presenting = false;
        self.last_shown_at = Some(now);
        debug!("presentation dismissed, priming next fetch");
        self.request_load(now);
        Ok(())
    }

    /// The surface could not start the presentation.
    ///
    /// Discards the unit so a broken handle is never retried, leaves
    /// `last_shown_at` untouched (no impression occurred), and primes
    /// the next fetch.
    pub fn on_presentation_failed(
        &mut self,
        reason: &PresentError,
        now: Time,
    ) -> Result<(), ProtocolViolation> {
        if !self.presenting {
            return Err(self.anomaly(ProtocolViolation::FailedWithoutPresentation));
        }
        self.inventory = None;
        self.presenting = false;
        self.stats.presentations_failed += 1;
        warn!(%reason, "presentation failed to start, priming next fetch");
        self.request_load(now);
        Ok(())
    }

    // ─── Queries ───────────────────────────────────────────────────

    /// Fresh inventory is held (loaded and within TTL at `now`).
    #[must_use]
    pub fn is_inventory_ready(&self, now: Time) -> bool {
        self.inventory_fresh(now)
    }

    /// A presentation is currently on screen.
    #[must_use]
    pub fn is_presenting(&self) -> bool {
        self.presenting
    }

    /// Derived machine phase at `now`.
    #[must_use]
    pub fn phase(&self, now: Time) -> Phase {
        if self.presenting {
            Phase::Presenting
        } else if self.fetch_in_flight {
            Phase::FetchInFlight
        } else if self.inventory_fresh(now) {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Status snapshot for the host bridge.
    #[must_use]
    pub fn status(&self, now: Time) -> SchedulerStatus {
        SchedulerStatus {
            inventory_ready: self.inventory_fresh(now),
            presenting: self.presenting,
        }
    }

    /// Transition counters since construction.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    // ─── Guards ────────────────────────────────────────────────────

    fn inventory_fresh(&self, now: Time) -> bool {
        self.inventory.is_some() && now.saturating_since(self.loaded_at) < self.config.inventory_ttl
    }

    fn frequency_gate_open(&self, now: Time) -> bool {
        match self.last_shown_at {
            None => true,
            Some(shown) => now.saturating_since(shown) >= self.config.min_show_interval,
        }
    }

    fn anomaly(&mut self, violation: ProtocolViolation) -> ProtocolViolation {
        self.stats.protocol_anomalies += 1;
        warn!(%violation, "collaborator protocol violation ignored");
        violation
    }
}
