use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use shopbeacon::activity::{ActivityCollector, ActivityConfig};
use shopbeacon::collector::TrackerCall;
use shopbeacon::context::{ActivityEventType, ContextStore};
use shopbeacon::events::EventBus;
use shopbeacon::{InMemoryTracker, Instrumentation};

fn collector_fixture() -> (ActivityCollector, ContextStore, EventBus) {
    let bus = EventBus::new();
    let context = ContextStore::new();
    let collector = ActivityCollector::new(bus.clone(), context.clone(), ActivityConfig::default());
    (collector, context, bus)
}

// ── Ping cadence ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn pings_once_per_interval_while_visible() {
    let (collector, context, _bus) = collector_fixture();
    collector.start().await;

    sleep(Duration::from_secs(26)).await;

    assert_eq!(collector.pings().await, 5);
    let offsets = context.page_offsets().expect("offsets published");
    assert_eq!(offsets.pings, 5);
    assert_eq!(offsets.ping_interval_secs, 5);
    assert_eq!(offsets.event_type, ActivityEventType::PagePing);

    collector.stop().await.expect("stop ping loop");
}

#[tokio::test(start_paused = true)]
async fn no_pings_while_hidden() {
    let (collector, _context, _bus) = collector_fixture();
    collector.start().await;

    sleep(Duration::from_secs(11)).await;
    assert_eq!(collector.pings().await, 2);

    collector.set_visible(false);
    sleep(Duration::from_secs(60)).await;
    assert_eq!(collector.pings().await, 2);

    collector.stop().await.expect("stop ping loop");
}

#[tokio::test(start_paused = true)]
async fn resume_waits_a_full_interval() {
    let (collector, _context, _bus) = collector_fixture();
    collector.start().await;

    sleep(Duration::from_secs(6)).await;
    assert_eq!(collector.pings().await, 1);

    collector.set_visible(false);
    sleep(Duration::from_secs(4)).await;
    collector.set_visible(true);

    // Were the old interval still alive, a tick would land immediately.
    sleep(Duration::from_secs(3)).await;
    assert_eq!(collector.pings().await, 1);

    sleep(Duration::from_secs(3)).await;
    assert_eq!(collector.pings().await, 2);

    collector.stop().await.expect("stop ping loop");
}

#[tokio::test(start_paused = true)]
async fn restart_keeps_a_single_ping_loop() {
    let (collector, _context, _bus) = collector_fixture();
    collector.start().await;
    collector.start().await;

    sleep(Duration::from_secs(6)).await;
    assert_eq!(collector.pings().await, 1);

    collector.stop().await.expect("stop ping loop");
}

#[tokio::test(start_paused = true)]
async fn stop_halts_pinging() {
    let (collector, _context, _bus) = collector_fixture();
    collector.start().await;

    sleep(Duration::from_secs(6)).await;
    collector.stop().await.expect("stop ping loop");

    sleep(Duration::from_secs(30)).await;
    assert_eq!(collector.pings().await, 1);
}

// ── Scroll offsets ───────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn pings_carry_accumulated_scroll_offsets() {
    let (collector, context, _bus) = collector_fixture();
    collector.record_scroll(400, 2000, 800).await;
    collector.record_scroll(100, 2000, 800).await;
    collector.start().await;

    sleep(Duration::from_secs(6)).await;

    let offsets = context.page_offsets().expect("offsets published");
    assert_eq!(offsets.max_scroll_y, 400);
    assert_eq!(offsets.percent_viewed, 60);

    collector.stop().await.expect("stop ping loop");
}

// ── Flush / reset ────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn unload_publishes_summary_and_resets() {
    let (collector, context, _bus) = collector_fixture();
    collector.record_scroll(400, 2000, 800).await;
    collector.start().await;

    sleep(Duration::from_secs(11)).await;
    assert_eq!(collector.pings().await, 2);

    collector.page_unload().await;

    let offsets = context.page_offsets().expect("unload snapshot published");
    assert_eq!(offsets.event_type, ActivityEventType::PageUnload);
    assert_eq!(offsets.pings, 2);
    assert_eq!(collector.pings().await, 0);

    // The next page starts its count from scratch.
    sleep(Duration::from_secs(5)).await;
    let offsets = context.page_offsets().expect("offsets published");
    assert_eq!(offsets.pings, 1);
    assert_eq!(offsets.max_scroll_y, 0);
    assert_eq!(offsets.event_type, ActivityEventType::PagePing);

    collector.stop().await.expect("stop ping loop");
}

#[tokio::test(start_paused = true)]
async fn route_change_resets_like_unload() {
    let (collector, context, _bus) = collector_fixture();
    collector.record_scroll(900, 3000, 800).await;
    collector.start().await;

    sleep(Duration::from_secs(6)).await;
    collector.route_changed().await;

    let offsets = context.page_offsets().expect("flush snapshot published");
    assert_eq!(offsets.event_type, ActivityEventType::PageUnload);
    assert_eq!(collector.pings().await, 0);

    collector.stop().await.expect("stop ping loop");
}

// ── End-to-end through the handlers ──────────────────────────────

#[tokio::test(start_paused = true)]
async fn ping_flushes_through_collector_handlers() {
    let tracker = InMemoryTracker::new();
    let instrumentation = Instrumentation::new(
        Arc::new(tracker.clone()),
        ActivityConfig::default(),
    );

    instrumentation.activity().start().await;
    sleep(Duration::from_secs(6)).await;

    let calls = tracker.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        TrackerCall::SelfDescribingEvent(event) => {
            assert_eq!(event.data["pings"], 1);
        }
        other => panic!("expected self-describing event, got {other:?}"),
    }

    // The handler flushed the slot, so the summary is not double-counted.
    assert!(instrumentation.context().page_offsets().is_none());

    instrumentation.activity().stop().await.expect("stop ping loop");
}
