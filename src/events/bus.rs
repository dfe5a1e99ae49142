use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use log::warn;
use uuid::Uuid;

use super::types::{EventKind, StorefrontEvent};

type Handler = Arc<dyn Fn(&StorefrontEvent) + Send + Sync + 'static>;

/// Handle returned by [`EventBus::subscribe`], accepted by
/// [`EventBus::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

struct Subscription {
    id: SubscriptionId,
    handler: Handler,
}

struct BusState {
    handlers: HashMap<EventKind, Vec<Subscription>>,
}

/// In-process pub/sub bus for [`StorefrontEvent`]s.
///
/// Delivery is synchronous on the publishing thread, in subscription
/// order. The registry lock is released before handlers run, so a handler
/// may itself publish or unsubscribe; an unsubscribe performed inside a
/// handler takes effect for the next publish.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Mutex<BusState>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusState {
                handlers: HashMap::new(),
            })),
        }
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&StorefrontEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        let mut guard = self.lock();
        guard.handlers.entry(kind).or_default().push(Subscription {
            id,
            handler: Arc::new(handler),
        });
        id
    }

    /// Returns `false` when the id was not registered (already removed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.lock();
        for subscriptions in guard.handlers.values_mut() {
            if let Some(position) = subscriptions.iter().position(|sub| sub.id == id) {
                subscriptions.remove(position);
                return true;
            }
        }
        false
    }

    pub fn publish(&self, event: StorefrontEvent) {
        let handlers: Vec<Handler> = {
            let guard = self.lock();
            guard
                .handlers
                .get(&event.kind())
                .map(|subs| subs.iter().map(|sub| Arc::clone(&sub.handler)).collect())
                .unwrap_or_default()
        };

        for handler in handlers {
            handler(&event);
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.lock().handlers.get(&kind).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BusState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("event bus lock poisoned; continuing with inner state");
                poisoned.into_inner()
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
