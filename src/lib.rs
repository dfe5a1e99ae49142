pub mod activity;
pub mod catalog;
pub mod collector;
pub mod context;
pub mod events;
pub mod recs;
pub mod settings;

use std::sync::Arc;

pub use activity::{ActivityCollector, ActivityConfig, PING_INTERVAL};
pub use catalog::{mini_cart_query, InstrumentedProductDetail, ProductDetail};
pub use collector::{CollectorHandlers, InMemoryTracker, SelfDescribingJson, StructEvent, Tracker};
pub use context::{ContextStore, PageOffsets, Product, StorefrontInstance};
pub use events::{EventBus, EventKind, StorefrontEvent, SubscriptionId};
pub use recs::{PageType, RecsClient, RecsFetcher, RecsProps, RecsState};
pub use settings::{InstrumentationSettings, SettingsStore};

/// Fully wired instrumentation layer: one bus, one context store, the
/// collector handler set, and the activity collector, sharing the given
/// tracker. Dropping it detaches the handlers.
pub struct Instrumentation {
    bus: EventBus,
    context: ContextStore,
    activity: ActivityCollector,
    _handlers: CollectorHandlers,
}

impl Instrumentation {
    pub fn new(tracker: Arc<dyn Tracker>, config: ActivityConfig) -> Self {
        let bus = EventBus::new();
        let context = ContextStore::new();
        let handlers = CollectorHandlers::attach(&bus, context.clone(), tracker);
        let activity = ActivityCollector::new(bus.clone(), context.clone(), config);

        Self {
            bus,
            context,
            activity,
            _handlers: handlers,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn context(&self) -> &ContextStore {
        &self.context
    }

    pub fn activity(&self) -> &ActivityCollector {
        &self.activity
    }

    /// A fetcher wired to this layer's bus and context.
    pub fn recs_fetcher(&self, client: Arc<dyn RecsClient>) -> RecsFetcher {
        RecsFetcher::new(client, self.context.clone(), self.bus.clone())
    }
}

/// Initialize logging (reads RUST_LOG env var). Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
