use std::{sync::Arc, time::Duration};

use log::debug;
use tokio::sync::{watch, Mutex};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::context::{ActivityEventType, ContextStore};
use crate::events::{EventBus, StorefrontEvent};

use super::state::ActivityState;

/// Visibility-gated ping loop.
///
/// While the page is visible, fires every `ping_interval`: bumps the ping
/// counter, writes the accumulated offsets into the context store, and
/// publishes [`StorefrontEvent::PageActivitySummary`]. While hidden, no
/// timer exists at all; regaining visibility starts a fresh interval, so a
/// hide/show flip never produces an early ping.
pub(super) async fn ping_loop(
    state: Arc<Mutex<ActivityState>>,
    context: ContextStore,
    bus: EventBus,
    ping_interval: Duration,
    mut visible_rx: watch::Receiver<bool>,
    cancel_token: CancellationToken,
) {
    loop {
        if !*visible_rx.borrow() {
            tokio::select! {
                changed = visible_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                _ = cancel_token.cancelled() => break,
            }
        }

        let mut ticker = time::interval(ping_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a fresh interval completes immediately; consume
        // it so pings land at interval boundaries, not at resume time.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    emit_ping(&state, &context, &bus, ping_interval).await;
                }
                changed = visible_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*visible_rx.borrow() {
                        debug!("page hidden, pausing activity pings");
                        break;
                    }
                }
                _ = cancel_token.cancelled() => return,
            }
        }
    }
}

async fn emit_ping(
    state: &Arc<Mutex<ActivityState>>,
    context: &ContextStore,
    bus: &EventBus,
    ping_interval: Duration,
) {
    let offsets = {
        let mut guard = state.lock().await;
        guard.pings += 1;
        guard.page_offsets(ping_interval, ActivityEventType::PagePing)
    };

    debug!("activity ping {}", offsets.pings);
    context.set_page_offsets(offsets);
    bus.publish(StorefrontEvent::PageActivitySummary);
}
