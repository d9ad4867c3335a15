//! Error types for adsched-core.
//!
//! There are no fatal errors in this core. Fetch and presentation
//! failures are typed reasons fed *into* the scheduler through its
//! failure callbacks; the machine recovers locally and waits for the
//! next lifecycle event. Protocol violations are callbacks that arrive
//! in a state that should be impossible — they are logged and the
//! transition is skipped, never propagated as a panic.

/// Reason an inventory fetch could not produce an ad unit.
///
/// Opaque to the policy: the scheduler logs it and clears the
/// in-flight flag, nothing more. Retry is driven by the next lifecycle
/// event, never by a timer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Inventory fetch failed: {0}")]
pub struct FetchError(pub String);

/// Reason a presentation surface could not start rendering.
///
/// The associated inventory is discarded so a broken handle is never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Presentation failed: {0}")]
pub struct PresentError(pub String);

/// A collaborator callback arrived in a state where it cannot be
/// honored — a duplicate resolution, or a resolution for a dispatch
/// that never happened.
///
/// The scheduler logs the anomaly, leaves its state untouched, and
/// returns the violation to the caller. It never corrupts state and
/// never panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    /// `on_load_succeeded` with no fetch in flight.
    #[error("load success delivered with no fetch in flight")]
    LoadSuccessWithoutFetch,

    /// `on_load_failed` with no fetch in flight.
    #[error("load failure delivered with no fetch in flight")]
    LoadFailureWithoutFetch,

    /// `on_presentation_dismissed` with nothing on screen.
    #[error("dismissal delivered with no presentation on screen")]
    DismissedWithoutPresentation,

    /// `on_presentation_failed` with nothing on screen.
    #[error("show failure delivered with no presentation on screen")]
    FailedWithoutPresentation,

    /// `on_presentation_started` with nothing on screen.
    #[error("render confirmation delivered with no presentation on screen")]
    StartedWithoutPresentation,
}
