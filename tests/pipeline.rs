// tests/pipeline.rs
//! End-to-end pipeline scenarios: capture through delivery and persistence

mod common;

use common::{RecordingBeacon, RecordingPixel, RecordingTransport, SwitchableNetwork};
use faultline::report::transport::{BatchTransport, Beacon, Connectivity, PixelSink};
use faultline::storage::store::{MemoryStore, QueueStore};
use faultline::utils::clock::ManualClock;
use faultline::{ErrorMonitor, MonitorConfig, RawEvent, ReportMethod};
use std::sync::Arc;
use std::time::Duration;

fn script_error(message: &str) -> RawEvent {
    RawEvent::Script {
        message: message.to_string(),
        filename: Some("app.js".to_string()),
        lineno: Some(42),
        colno: Some(7),
    }
}

fn base_config(method: ReportMethod) -> MonitorConfig {
    MonitorConfig {
        report_method: method,
        report_url: "https://errors.example.com/ingest".to_string(),
        batch_window_ms: 20,
        ..Default::default()
    }
}

/// Scenario A: two identical JS errors with dedupe on leave one queued record
#[tokio::test]
async fn duplicate_js_errors_collapse_to_one() {
    let monitor = ErrorMonitor::builder(MonitorConfig {
        can_report: false,
        ..Default::default()
    })
    .clock(Arc::new(ManualClock::new(1_000)))
    .build();
    monitor.start().unwrap();

    monitor.capture(script_error("Uncaught TypeError")).await;
    monitor.capture(script_error("Uncaught TypeError")).await;

    assert_eq!(monitor.error_queue().len(), 1);
}

/// Scenario B: image strategy fires one pixel per record, immediately
#[tokio::test]
async fn image_strategy_fires_pixels_immediately() {
    let pixel = Arc::new(RecordingPixel::default());
    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Image))
        .clock(Arc::new(ManualClock::new(1_000)))
        .pixel(Arc::clone(&pixel) as Arc<dyn PixelSink>)
        .build();
    monitor.start().unwrap();

    for i in 0..3 {
        monitor.capture(script_error(&format!("err {}", i))).await;
    }

    let fired = pixel.fired.lock();
    assert_eq!(fired.len(), 3);
    assert_eq!(fired[0].0.message, "err 0");
    assert_eq!(fired[2].0.message, "err 2");
    drop(fired);

    assert!(monitor.error_queue().is_empty());
}

/// Scenario C: offline at the batch window persists the record and keeps it queued
#[tokio::test]
async fn offline_batch_window_persists_backlog() {
    let transport = Arc::new(RecordingTransport::default());
    let network = Arc::new(SwitchableNetwork::new(false));
    let store = Arc::new(MemoryStore::new());

    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Request))
        .clock(Arc::new(ManualClock::new(1_000)))
        .transport(Arc::clone(&transport) as Arc<dyn BatchTransport>)
        .connectivity(Arc::clone(&network) as Arc<dyn Connectivity>)
        .store(store.clone() as Arc<dyn QueueStore>)
        .build();
    monitor.start().unwrap();

    monitor.capture(script_error("offline error")).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert!(transport.batches.lock().is_empty());
    assert_eq!(store.load().unwrap().len(), 1);
    assert_eq!(monitor.error_queue().len(), 1);

    // Back online: the next capture arms a fresh window and the whole
    // backlog is re-attempted
    network.set_online(true);
    monitor.capture(script_error("second error")).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let batches = transport.batches.lock();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[0][0].message, "offline error");
    drop(batches);

    assert!(monitor.error_queue().is_empty());
    assert!(store.load().unwrap().is_empty());
}

/// Scenario D: exit flush with navigator sends one beacon with everything,
/// and the queue clears regardless of the beacon outcome
#[tokio::test]
async fn exit_flush_sends_one_beacon_and_clears() {
    let beacon = Arc::new(RecordingBeacon::default());
    beacon.reject.store(true, std::sync::atomic::Ordering::SeqCst);

    let monitor = ErrorMonitor::builder(MonitorConfig {
        can_report: false, // keep records queued until the flush
        ..base_config(ReportMethod::Navigator)
    })
    .clock(Arc::new(ManualClock::new(1_000)))
    .beacon(Arc::clone(&beacon) as Arc<dyn Beacon>)
    .build();
    monitor.start().unwrap();

    for i in 0..5 {
        monitor.capture(script_error(&format!("pending {}", i))).await;
    }
    assert_eq!(monitor.error_queue().len(), 5);

    monitor.flush_on_exit().await;

    let calls = beacon.calls.lock();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 5);
    drop(calls);

    assert!(monitor.error_queue().is_empty());
}

/// Failed batch leaves queue contents and order untouched, with the backlog
/// mirrored to the store
#[tokio::test]
async fn failed_batch_loses_nothing() {
    let transport = Arc::new(RecordingTransport::default());
    transport.fail.store(true, std::sync::atomic::Ordering::SeqCst);
    let store = Arc::new(MemoryStore::new());

    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Request))
        .clock(Arc::new(ManualClock::new(1_000)))
        .transport(Arc::clone(&transport) as Arc<dyn BatchTransport>)
        .store(store.clone() as Arc<dyn QueueStore>)
        .build();
    monitor.start().unwrap();

    for i in 0..4 {
        monitor.capture(script_error(&format!("err {}", i))).await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    let queued = monitor.error_queue();
    let messages: Vec<_> = queued.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["err 0", "err 1", "err 2", "err 3"]);
    assert_eq!(store.load().unwrap().len(), 4);
}

/// Beacon strategy delivers one record per call, oldest first
#[tokio::test]
async fn navigator_strategy_sends_singly_in_order() {
    let beacon = Arc::new(RecordingBeacon::default());

    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Navigator))
        .clock(Arc::new(ManualClock::new(1_000)))
        .beacon(Arc::clone(&beacon) as Arc<dyn Beacon>)
        .build();
    monitor.start().unwrap();

    monitor.capture(script_error("first")).await;
    monitor.capture(script_error("second")).await;

    let calls = beacon.calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].len(), 1);
    assert_eq!(calls[0][0].message, "first");
    assert_eq!(calls[1][0].message, "second");
    drop(calls);

    assert!(monitor.error_queue().is_empty());
}

/// Rejected beacon re-queues the record and mirrors it to the store
#[tokio::test]
async fn rejected_beacon_requeues_and_persists() {
    let beacon = Arc::new(RecordingBeacon::default());
    beacon.reject.store(true, std::sync::atomic::Ordering::SeqCst);
    let store = Arc::new(MemoryStore::new());

    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Navigator))
        .clock(Arc::new(ManualClock::new(1_000)))
        .beacon(Arc::clone(&beacon) as Arc<dyn Beacon>)
        .store(store.clone() as Arc<dyn QueueStore>)
        .build();
    monitor.start().unwrap();

    monitor.capture(script_error("rejected")).await;

    assert_eq!(monitor.error_queue().len(), 1);
    assert_eq!(store.load().unwrap().len(), 1);
}

/// Records persisted in a previous session are recovered ahead of new
/// captures and drain through the normal pipeline
#[tokio::test]
async fn recovered_records_report_before_new_ones() {
    let store = Arc::new(MemoryStore::new());
    let beacon = Arc::new(RecordingBeacon::default());

    // First session: reporting disabled, one record persisted
    {
        let monitor = ErrorMonitor::builder(MonitorConfig {
            can_report: false,
            ..base_config(ReportMethod::Navigator)
        })
        .clock(Arc::new(ManualClock::new(1_000)))
        .store(store.clone() as Arc<dyn QueueStore>)
        .build();
        monitor.start().unwrap();
        monitor.capture(script_error("from last session")).await;
    }

    // Second session recovers and reports oldest-first
    let monitor = ErrorMonitor::builder(base_config(ReportMethod::Navigator))
        .clock(Arc::new(ManualClock::new(2_000)))
        .store(store.clone() as Arc<dyn QueueStore>)
        .beacon(Arc::clone(&beacon) as Arc<dyn Beacon>)
        .build();
    monitor.start().unwrap();
    assert!(store.load().unwrap().is_empty());

    monitor.capture(script_error("fresh")).await;

    let calls = beacon.calls.lock();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][0].message, "from last session");
    assert_eq!(calls[1][0].message, "fresh");
}
