use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;
use serde_json::Value;

const MAX_RECENT_CALLS: usize = 64;

/// Self-describing JSON payload: an iglu schema URI plus its data.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelfDescribingJson {
    pub schema: String,
    pub data: Value,
}

/// Structured event with the collector's fixed argument positions
/// (category, action, label, property, value, contexts).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StructEvent {
    pub category: String,
    pub action: String,
    pub label: Option<String>,
    pub property: Option<String>,
    pub value: Option<Value>,
    pub contexts: Vec<SelfDescribingJson>,
}

/// Seam to the tracking collector transport. The host application plugs in
/// its real emitter; [`InMemoryTracker`] buffers calls for tests and local
/// inspection.
pub trait Tracker: Send + Sync {
    fn track_page_view(&self);
    fn track_struct_event(&self, event: StructEvent);
    fn track_self_describing_event(&self, event: SelfDescribingJson);
    fn set_custom_url(&self, url: &str);
    fn set_referrer_url(&self, url: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCall {
    PageView,
    StructEvent(StructEvent),
    SelfDescribingEvent(SelfDescribingJson),
    CustomUrl(String),
    ReferrerUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub at: DateTime<Utc>,
    pub call: TrackerCall,
}

struct TrackerState {
    recent_calls: Vec<RecordedCall>,
    call_count: u64,
}

/// Buffering tracker: keeps a bounded ring of recent calls plus a total
/// counter.
pub struct InMemoryTracker {
    inner: Arc<Mutex<TrackerState>>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TrackerState {
                recent_calls: Vec::with_capacity(MAX_RECENT_CALLS),
                call_count: 0,
            })),
        }
    }

    fn record(&self, call: TrackerCall) {
        let mut state = self.lock();
        state.call_count += 1;
        state.recent_calls.push(RecordedCall {
            at: Utc::now(),
            call,
        });
        if state.recent_calls.len() > MAX_RECENT_CALLS {
            state.recent_calls.remove(0);
        }
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.lock()
            .recent_calls
            .iter()
            .map(|recorded| recorded.call.clone())
            .collect()
    }

    pub fn recent(&self) -> Vec<RecordedCall> {
        self.lock().recent_calls.clone()
    }

    pub fn struct_events(&self) -> Vec<StructEvent> {
        self.lock()
            .recent_calls
            .iter()
            .filter_map(|recorded| match &recorded.call {
                TrackerCall::StructEvent(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn call_count(&self) -> u64 {
        self.lock().call_count
    }

    pub fn reset(&self) {
        let mut state = self.lock();
        state.recent_calls.clear();
        state.call_count = 0;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("tracker lock poisoned; continuing with inner state");
                poisoned.into_inner()
            }
        }
    }
}

impl Tracker for InMemoryTracker {
    fn track_page_view(&self) {
        self.record(TrackerCall::PageView);
    }

    fn track_struct_event(&self, event: StructEvent) {
        self.record(TrackerCall::StructEvent(event));
    }

    fn track_self_describing_event(&self, event: SelfDescribingJson) {
        self.record(TrackerCall::SelfDescribingEvent(event));
    }

    fn set_custom_url(&self, url: &str) {
        self.record(TrackerCall::CustomUrl(url.to_string()));
    }

    fn set_referrer_url(&self, url: &str) {
        self.record(TrackerCall::ReferrerUrl(url.to_string()));
    }
}

impl Default for InMemoryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTracker {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
