//! Scheduling types — configuration and observability surface.
//!
//! These are the caller-facing types around the machine: the fixed
//! construction-time configuration, the derived phase, and the two
//! read-only snapshots (status for the host bridge, stats for
//! diagnostics). None of them carry policy; the policy lives in
//! [`AdScheduler`](super::AdScheduler).

use std::time::Duration;

use crate::constants::{DEFAULT_INVENTORY_TTL, DEFAULT_MIN_SHOW_INTERVAL};

/// Freshness and frequency policy, fixed for the scheduler lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Maximum age of loaded-but-unshown inventory. Older inventory is
    /// discarded and re-fetched at the next decision point.
    pub inventory_ttl: Duration,
    /// Minimum spacing between the end of one successful presentation
    /// and the start of the next.
    pub min_show_interval: Duration,
}

impl SchedulerConfig {
    /// Config with explicit TTL and frequency cap.
    #[must_use]
    pub const fn new(inventory_ttl: Duration, min_show_interval: Duration) -> Self {
        Self {
            inventory_ttl,
            min_show_interval,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            inventory_ttl: DEFAULT_INVENTORY_TTL,
            min_show_interval: DEFAULT_MIN_SHOW_INTERVAL,
        }
    }
}

/// Derived machine phase.
///
/// The scheduler stores fields, not a phase tag; the phase is computed
/// on demand against a sampled `now` because `Ready` vs `Idle` depends
/// on lazy TTL expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No inventory, no fetch outstanding, nothing on screen.
    Idle,
    /// A fetch has been dispatched and has not resolved.
    FetchInFlight,
    /// Fresh inventory is held and could be presented.
    Ready,
    /// A presentation is on screen.
    Presenting,
}

/// Point-in-time status snapshot for the host bridge.
///
/// Serializes (with the `serde` feature) to the camelCase shape the
/// host's status query expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SchedulerStatus {
    /// Fresh inventory is held (loaded and within TTL).
    pub inventory_ready: bool,
    /// A presentation is currently on screen.
    pub presenting: bool,
}

/// Monotonic transition counters.
///
/// Pure observability: no policy decision reads these. They exist so
/// hosts and tests can verify dispatch counts without instrumenting
/// the collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    /// Fetches dispatched to the inventory source.
    pub fetches_dispatched: u64,
    /// Fetch resolutions that reported failure.
    pub fetch_failures: u64,
    /// Presentations delegated to a surface.
    pub presentations_dispatched: u64,
    /// Presentations confirmed on screen by the surface.
    pub impressions_confirmed: u64,
    /// Presentations that failed to start.
    pub presentations_failed: u64,
    /// Inventory discarded unshown because it aged past TTL.
    pub inventory_expired: u64,
    /// Collaborator callbacks ignored as protocol violations.
    pub protocol_anomalies: u64,
}
