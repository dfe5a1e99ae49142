pub mod bus;
pub mod types;

pub use bus::{EventBus, SubscriptionId};
pub use types::{EventKind, StorefrontEvent};
