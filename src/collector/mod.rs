pub mod contexts;
pub mod handlers;
pub mod tracker;

pub use contexts::{
    cart_id_hash, item_context, prepare_product_context, unit_context, ACTIVITY_SUMMARY_SCHEMA_URL,
    PRODUCT_SCHEMA_URL, RECS_ITEM_SCHEMA_URL, RECS_UNIT_SCHEMA_URL,
};
pub use handlers::CollectorHandlers;
pub use tracker::{InMemoryTracker, RecordedCall, SelfDescribingJson, StructEvent, Tracker, TrackerCall};
