//! Time source abstraction.
//!
//! The scheduler never reads a clock itself: every entry point takes a
//! single sampled `now`, so all guards for one decision observe the
//! same instant. [`Clock`] is how the serialized wrapper obtains that
//! sample — [`WallClock`] in production, [`VirtualClock`] in tests
//! where time only advances when told to.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Monotonic timestamp, milliseconds since the clock's epoch.
///
/// Elapsed-time math saturates: a clock observed to move backward
/// yields zero elapsed time, never an underflow. The policy therefore
/// never shows more frequently than configured after a clock
/// correction, and never wedges into a permanent "never show again"
/// state either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(u64);

impl Time {
    /// The clock epoch.
    pub const ZERO: Time = Time(0);

    /// Construct from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Time(ms)
    }

    /// Construct from whole seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Time(secs * 1_000)
    }

    /// Milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Elapsed time since `earlier`, saturating to zero if `earlier`
    /// is in the future of `self`.
    #[must_use]
    pub fn saturating_since(self, earlier: Time) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// This timestamp advanced by `d` (saturating at the numeric
    /// ceiling, which is ~585 million years of uptime).
    #[must_use]
    pub fn advanced_by(self, d: Duration) -> Time {
        Time(self.0.saturating_add(d.as_millis() as u64))
    }
}

/// Source of `now` samples.
///
/// Implementations must be monotonic in intent; [`Time`]'s saturating
/// arithmetic absorbs the cases where they are not.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Time;
}

/// Wall clock for production use.
///
/// Backed by `std::time::Instant`; the epoch is the moment this clock
/// was created. `Instant` is monotonic by contract, so backward jumps
/// cannot occur here — the saturating math guards hosts that feed in
/// their own timestamps instead.
#[derive(Debug)]
pub struct WallClock {
    epoch: std::time::Instant,
}

impl WallClock {
    /// Creates a wall clock whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: std::time::Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn now(&self) -> Time {
        Time(self.epoch.elapsed().as_millis() as u64)
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: AtomicU64,
}

impl VirtualClock {
    /// Creates a virtual clock at [`Time::ZERO`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by `d`.
    pub fn advance(&self, d: Duration) {
        self.now_ms
            .fetch_add(d.as_millis() as u64, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute time. May move backward; the
    /// policy's saturating elapsed math exists for exactly that case.
    pub fn set(&self, t: Time) {
        self.now_ms.store(t.as_millis(), Ordering::SeqCst);
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Time {
        Time(self.now_ms.load(Ordering::SeqCst))
    }
}
