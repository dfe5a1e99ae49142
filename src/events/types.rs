use serde::Serialize;

use crate::recs::{PageType, RecProduct, RecUnit};

/// Domain events exchanged between the storefront glue and the collector
/// handlers. Payloads carry only what the original publisher knew at the
/// time of publication; everything else is read from the context store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "event")]
pub enum StorefrontEvent {
    PageView,
    ProductPageView,
    AddToCart,
    PlaceOrder {
        order_id: String,
        cart_id: String,
    },
    /// The page-offset slot of the context store changed (ping or unload).
    PageActivitySummary,
    CustomUrl,
    ReferrerUrl,
    RecsRequestSent {
        page_type: PageType,
    },
    RecsResponseReceived {
        page_type: PageType,
        rec_units: Vec<RecUnit>,
    },
    RecsItemClick {
        unit: RecUnit,
        item: RecProduct,
    },
    RecsUnitView {
        unit: RecUnit,
    },
    RecsUnitRender {
        unit: RecUnit,
    },
}

/// Subscription key: the discriminant of [`StorefrontEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PageView,
    ProductPageView,
    AddToCart,
    PlaceOrder,
    PageActivitySummary,
    CustomUrl,
    ReferrerUrl,
    RecsRequestSent,
    RecsResponseReceived,
    RecsItemClick,
    RecsUnitView,
    RecsUnitRender,
}

impl StorefrontEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StorefrontEvent::PageView => EventKind::PageView,
            StorefrontEvent::ProductPageView => EventKind::ProductPageView,
            StorefrontEvent::AddToCart => EventKind::AddToCart,
            StorefrontEvent::PlaceOrder { .. } => EventKind::PlaceOrder,
            StorefrontEvent::PageActivitySummary => EventKind::PageActivitySummary,
            StorefrontEvent::CustomUrl => EventKind::CustomUrl,
            StorefrontEvent::ReferrerUrl => EventKind::ReferrerUrl,
            StorefrontEvent::RecsRequestSent { .. } => EventKind::RecsRequestSent,
            StorefrontEvent::RecsResponseReceived { .. } => EventKind::RecsResponseReceived,
            StorefrontEvent::RecsItemClick { .. } => EventKind::RecsItemClick,
            StorefrontEvent::RecsUnitView { .. } => EventKind::RecsUnitView,
            StorefrontEvent::RecsUnitRender { .. } => EventKind::RecsUnitRender,
        }
    }
}
