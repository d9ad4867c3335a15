//! Inventory source — the collaborator that fetches displayable ads.
//!
//! The trait is dispatch-only. `begin_fetch` must return immediately
//! after kicking off the asynchronous load; the resolution re-enters
//! the scheduler later through
//! [`on_load_succeeded`](crate::schedule::AdScheduler::on_load_succeeded)
//! or [`on_load_failed`](crate::schedule::AdScheduler::on_load_failed),
//! from the collaborator's own execution context.
//!
//! The ad unit type is caller-owned and opaque: the scheduler never
//! creates or inspects ad content, it only holds the unit between load
//! and presentation.

/// Dispatches asynchronous inventory fetches.
///
/// # Contract
///
/// - Exactly one resolution (success or failure) MUST eventually be
///   delivered per `begin_fetch` call. The scheduler imposes no
///   timeout; a source that never resolves leaves the machine in
///   `FetchInFlight` indefinitely.
/// - Resolutions MUST NOT be delivered synchronously from inside
///   `begin_fetch` (the caller may be holding the serialization lock).
/// - Unsolicited or duplicate resolutions are tolerated: the scheduler
///   logs a protocol violation and ignores them.
pub trait InventorySource {
    /// Kick off one asynchronous fetch. Called at most once per
    /// outstanding request; the scheduler guarantees it never issues a
    /// second call before the first resolves.
    fn begin_fetch(&mut self);
}
