//! adsched-core — app-open ad scheduling policy.
//!
//! Given a stream of application lifecycle events (foreground
//! transitions) and asynchronous ad-inventory fetch results, this
//! crate decides whether and when to request a new ad and whether and
//! when to present an already-fetched one. Everything platform- or
//! network-specific sits behind two narrow collaborator traits; the
//! crate itself is pure policy over time and events, consumable by any
//! native shell (Capacitor plugin, Kotlin, Swift, desktop).
//!
//! # Module Map
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`constants`] | Default TTL and frequency-cap durations |
//! | [`errors`] | Failure reasons and protocol violations |
//! | [`clock`] | Monotonic time, wall and virtual clocks |
//! | [`inventory`] | Inventory source collaborator trait |
//! | [`surface`] | Presentation surface collaborator trait |
//! | [`schedule`] | The scheduler state machine and its serialized handle |
//!
//! # Policy in one paragraph
//!
//! At most one fetch and one presentation are ever in flight. Loaded
//! inventory expires after a TTL, checked lazily at decision points.
//! Successful presentations are spaced by a minimum interval; the
//! first show is always allowed. Failures return the machine to idle
//! and the next lifecycle event drives the retry, so the retry rate is
//! bounded by the natural rate of app usage.

/// Default policy durations shared with the host shells.
pub mod constants;

/// Failure reasons and protocol-violation anomalies.
pub mod errors;

/// Time source abstraction — monotonic timestamps, wall and virtual clocks.
pub mod clock;

/// Inventory source collaborator trait.
pub mod inventory;

/// Presentation surface collaborator trait.
pub mod surface;

/// The scheduler state machine, its types, and the serialized handle.
pub mod schedule;

pub use clock::{Clock, Time, VirtualClock, WallClock};
pub use errors::{FetchError, PresentError, ProtocolViolation};
pub use inventory::InventorySource;
pub use schedule::{
    AdScheduler, Phase, SchedulerConfig, SchedulerStats, SchedulerStatus, SharedAdScheduler,
};
pub use surface::PresentationSurface;
