pub mod controller;
pub mod ping_loop;
pub mod state;

pub use controller::{ActivityCollector, ActivityConfig};
pub use state::{ActivityState, ScrollOffsets};

use std::time::Duration;

/// Default ping cadence while the page is visible.
pub const PING_INTERVAL: Duration = Duration::from_secs(5);
