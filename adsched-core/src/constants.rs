//! Policy constants — canonical values shared with the host shells.
//!
//! Both defaults are four hours, matching the frequency contract the
//! ad network expects for app-open placements. Hosts may override per
//! scheduler via [`SchedulerConfig`](crate::schedule::SchedulerConfig);
//! these are the values used when they don't.

use std::time::Duration;

/// Default maximum age of loaded-but-unshown inventory. Inventory
/// older than this is discarded and re-fetched at the next decision
/// point (lazy expiry — there is no background timer).
pub const DEFAULT_INVENTORY_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// Default minimum spacing between the end of one successful
/// presentation and the start of the next.
pub const DEFAULT_MIN_SHOW_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);
