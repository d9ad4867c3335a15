//! Presentation surface — the collaborator that renders a full-screen
//! ad and reports its outcome.
//!
//! Like the inventory source, this is dispatch-only: `present` returns
//! immediately, and the outcome re-enters the scheduler through
//! [`on_presentation_started`](crate::schedule::AdScheduler::on_presentation_started)
//! (zero or one times), then exactly one of
//! [`on_presentation_dismissed`](crate::schedule::AdScheduler::on_presentation_dismissed)
//! or
//! [`on_presentation_failed`](crate::schedule::AdScheduler::on_presentation_failed).

/// A host surface capable of rendering a full-screen ad unit.
///
/// The scheduler tracks the most recently observed foreground surface
/// and presents on that one. Surfaces are replaced wholesale on every
/// foreground event; an implementation should be a cheap handle to the
/// real rendering context, not the context itself.
///
/// # Contract
///
/// - Exactly one terminal outcome (dismissed or failed) MUST
///   eventually be delivered per `present` call. No timeout is
///   imposed; a surface that never reports leaves the machine in
///   `Presenting` indefinitely.
/// - Outcomes MUST NOT be delivered synchronously from inside
///   `present`.
pub trait PresentationSurface<A> {
    /// Begin rendering `unit` full screen.
    fn present(&mut self, unit: &A);
}
