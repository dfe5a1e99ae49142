use std::{sync::Arc, time::Duration};

use anyhow::{Context as _, Result};
use log::info;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::context::{ActivityEventType, ContextStore};
use crate::events::{EventBus, StorefrontEvent};
use crate::settings::{debug_mode, InstrumentationSettings};

use super::ping_loop::ping_loop;
use super::state::ActivityState;
use super::PING_INTERVAL;

#[derive(Debug, Clone)]
pub struct ActivityConfig {
    pub ping_interval: Duration,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            ping_interval: PING_INTERVAL,
        }
    }
}

impl ActivityConfig {
    /// Settings-derived config. `SHOPBEACON_DEBUG` collapses the cadence to
    /// one second for local inspection.
    pub fn from_settings(settings: &InstrumentationSettings) -> Self {
        let ping_interval = if debug_mode() {
            Duration::from_secs(1)
        } else {
            Duration::from_secs(settings.ping_interval_secs)
        };
        Self { ping_interval }
    }
}

struct PingLoopHandle {
    handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

/// Activity-summary collector: accumulates scroll offsets, pings while the
/// page is visible, and flushes (then resets) on unload or route change.
#[derive(Clone)]
pub struct ActivityCollector {
    state: Arc<Mutex<ActivityState>>,
    context: ContextStore,
    bus: EventBus,
    config: ActivityConfig,
    visible_tx: Arc<watch::Sender<bool>>,
    worker: Arc<Mutex<Option<PingLoopHandle>>>,
}

impl ActivityCollector {
    pub fn new(bus: EventBus, context: ContextStore, config: ActivityConfig) -> Self {
        let (visible_tx, _visible_rx) = watch::channel(true);
        Self {
            state: Arc::new(Mutex::new(ActivityState::new())),
            context,
            bus,
            config,
            visible_tx: Arc::new(visible_tx),
            worker: Arc::new(Mutex::new(None)),
        }
    }

    /// Spawn the ping loop. An already-running loop is torn down first, so
    /// at most one is ever active.
    pub async fn start(&self) {
        let mut worker_guard = self.worker.lock().await;
        if let Some(existing) = worker_guard.take() {
            existing.cancel_token.cancel();
            existing.handle.abort();
        }

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(ping_loop(
            Arc::clone(&self.state),
            self.context.clone(),
            self.bus.clone(),
            self.config.ping_interval,
            self.visible_tx.subscribe(),
            cancel_token.clone(),
        ));

        info!(
            "activity collector started (ping every {:?})",
            self.config.ping_interval
        );
        *worker_guard = Some(PingLoopHandle {
            handle,
            cancel_token,
        });
    }

    /// Visibility gate. Hidden pauses the pings; visible resumes them with
    /// a full fresh interval.
    pub fn set_visible(&self, visible: bool) {
        self.visible_tx.send_if_modified(|current| {
            if *current == visible {
                false
            } else {
                *current = visible;
                true
            }
        });
    }

    pub async fn record_scroll(&self, scroll_y: u32, document_height: u32, viewport_height: u32) {
        let mut guard = self.state.lock().await;
        guard
            .offsets
            .record(scroll_y, document_height, viewport_height);
    }

    pub async fn pings(&self) -> u32 {
        self.state.lock().await.pings
    }

    /// Unload path: republish the accumulated offsets as a `pageUnload`
    /// summary, then reset everything. The loop keeps running (a route
    /// change starts a new page under the same collector).
    pub async fn page_unload(&self) {
        self.flush().await;
    }

    pub async fn route_changed(&self) {
        self.flush().await;
    }

    async fn flush(&self) {
        let mut offsets = {
            let guard = self.state.lock().await;
            // Prefer the last published snapshot so the flush carries the
            // ping count the collector already reported.
            self.context
                .page_offsets()
                .unwrap_or_else(|| {
                    guard.page_offsets(self.config.ping_interval, ActivityEventType::PageUnload)
                })
        };
        offsets.event_type = ActivityEventType::PageUnload;

        self.context.set_page_offsets(offsets);
        self.bus.publish(StorefrontEvent::PageActivitySummary);

        let mut guard = self.state.lock().await;
        guard.reset();
        info!("activity summary flushed, offsets reset");
    }

    pub async fn stop(&self) -> Result<()> {
        let taken = self.worker.lock().await.take();
        if let Some(worker) = taken {
            worker.cancel_token.cancel();
            worker
                .handle
                .await
                .context("ping loop task failed to join")?;
        }
        Ok(())
    }
}
