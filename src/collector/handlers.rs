use std::sync::Arc;

use log::error;
use serde_json::json;

use crate::context::ContextStore;
use crate::events::{EventBus, EventKind, StorefrontEvent, SubscriptionId};

use super::contexts::{
    cart_id_hash, item_context, prepare_product_context, unit_context,
    ACTIVITY_SUMMARY_SCHEMA_URL,
};
use super::tracker::{SelfDescribingJson, StructEvent, Tracker};

/// Subscription guard for the full collector handler set.
///
/// `attach` registers one handler per domain event; dropping the guard (or
/// calling [`CollectorHandlers::detach`]) unsubscribes them all.
pub struct CollectorHandlers {
    bus: EventBus,
    subscriptions: Vec<SubscriptionId>,
}

impl CollectorHandlers {
    pub fn attach(bus: &EventBus, context: ContextStore, tracker: Arc<dyn Tracker>) -> Self {
        let mut subscriptions = Vec::new();

        {
            let context = context.clone();
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::AddToCart, move |_event| {
                tracker.track_struct_event(StructEvent {
                    category: "product".into(),
                    action: "add-to-cart".into(),
                    label: None,
                    property: None,
                    value: None,
                    contexts: prepare_product_context(&context),
                });
            }));
        }

        {
            let context = context.clone();
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::ProductPageView, move |_event| {
                tracker.track_struct_event(StructEvent {
                    category: "product".into(),
                    action: "view".into(),
                    label: None,
                    property: None,
                    value: None,
                    contexts: prepare_product_context(&context),
                });
            }));
        }

        {
            let context = context.clone();
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::PageActivitySummary, move |_event| {
                let Some(offsets) = context.page_offsets() else {
                    return;
                };
                match serde_json::to_value(&offsets) {
                    Ok(data) => {
                        tracker.track_self_describing_event(SelfDescribingJson {
                            schema: ACTIVITY_SUMMARY_SCHEMA_URL.to_string(),
                            data,
                        });
                        // Each summary is flushed exactly once.
                        context.clear_page_offsets();
                    }
                    Err(err) => error!("failed to serialize activity summary: {err}"),
                }
            }));
        }

        {
            let context = context.clone();
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::CustomUrl, move |_event| {
                if let Some(url) = context.custom_url() {
                    tracker.set_custom_url(&url);
                }
            }));
        }

        {
            let context = context.clone();
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::ReferrerUrl, move |_event| {
                if let Some(url) = context.referrer_url() {
                    tracker.set_referrer_url(&url);
                }
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::PageView, move |_event| {
                tracker.track_page_view();
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::PlaceOrder, move |event| {
                let StorefrontEvent::PlaceOrder { order_id, cart_id } = event else {
                    return;
                };
                tracker.track_struct_event(StructEvent {
                    category: "checkout".into(),
                    action: "place-order".into(),
                    label: Some(order_id.clone()),
                    property: None,
                    value: Some(json!(cart_id_hash(cart_id))),
                    contexts: Vec::new(),
                });
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::RecsRequestSent, move |event| {
                let StorefrontEvent::RecsRequestSent { page_type } = event else {
                    return;
                };
                tracker.track_struct_event(StructEvent {
                    category: "recommendation-unit".into(),
                    action: "api-request-sent".into(),
                    label: None,
                    property: Some(page_type.to_string()),
                    value: None,
                    contexts: Vec::new(),
                });
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::RecsResponseReceived, move |event| {
                let StorefrontEvent::RecsResponseReceived {
                    page_type,
                    rec_units,
                } = event
                else {
                    return;
                };

                let mut contexts = Vec::new();
                for unit in rec_units {
                    contexts.push(unit_context(unit));
                    for product in unit.products.iter().take(unit.display_number) {
                        contexts.push(item_context(&unit.unit_id, product));
                    }
                }

                tracker.track_struct_event(StructEvent {
                    category: "recommendation-unit".into(),
                    action: "api-response-received".into(),
                    label: None,
                    property: Some(page_type.to_string()),
                    value: None,
                    contexts,
                });
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::RecsItemClick, move |event| {
                let StorefrontEvent::RecsItemClick { unit, item } = event else {
                    return;
                };
                tracker.track_struct_event(StructEvent {
                    category: "recommendation-unit".into(),
                    action: "rec-click".into(),
                    label: None,
                    property: Some(unit.page_type.to_string()),
                    value: Some(json!(item.rank)),
                    contexts: vec![unit_context(unit), item_context(&unit.unit_id, item)],
                });
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::RecsUnitView, move |event| {
                let StorefrontEvent::RecsUnitView { unit } = event else {
                    return;
                };
                tracker.track_struct_event(StructEvent {
                    category: "recommendation-unit".into(),
                    action: "view".into(),
                    label: None,
                    property: Some(unit.page_type.to_string()),
                    value: None,
                    contexts: vec![unit_context(unit)],
                });
            }));
        }

        {
            let tracker = Arc::clone(&tracker);
            subscriptions.push(bus.subscribe(EventKind::RecsUnitRender, move |event| {
                let StorefrontEvent::RecsUnitRender { unit } = event else {
                    return;
                };

                let mut contexts = vec![unit_context(unit)];
                for product in &unit.products {
                    contexts.push(item_context(&unit.unit_id, product));
                }

                tracker.track_struct_event(StructEvent {
                    category: "recommendation-unit".into(),
                    action: "impression-render".into(),
                    label: None,
                    property: Some(unit.page_type.to_string()),
                    value: None,
                    contexts,
                });
            }));
        }

        Self {
            bus: bus.clone(),
            subscriptions,
        }
    }

    /// Unsubscribe everything now instead of at scope end.
    pub fn detach(self) {}
}

impl Drop for CollectorHandlers {
    fn drop(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.bus.unsubscribe(id);
        }
    }
}
