//! Ad-display scheduling — freshness and frequency policy over
//! lifecycle events.
//!
//! The machine cycles `Idle → FetchInFlight → Ready → Presenting →
//! Idle` for the life of the process, driven entirely by the host's
//! lifecycle events and the collaborators' resolution callbacks. There
//! are no timers and no terminal state.

pub mod scheduler;
pub mod shared;
pub mod types;

// Re-export the canonical entry points and core types.
pub use scheduler::AdScheduler;
pub use shared::SharedAdScheduler;
pub use types::{Phase, SchedulerConfig, SchedulerStats, SchedulerStatus};
