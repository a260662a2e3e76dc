// src/main.rs
//! Faultline demo collector
//!
//! Stands in for the crash-inducing demo page: wires a monitor with a
//! SQLite-backed store, feeds it synthetic faults and replay events, and
//! performs the exit-time flush on ctrl-c.

use anyhow::Result;
use faultline::observability::init_tracing;
use faultline::{ErrorMonitor, MonitorConfig, RawEvent, SqliteStore};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    info!("Starting faultline demo v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (defaults < faultline.toml < FAULTLINE_* env)
    let config = MonitorConfig::load()?;
    info!("Configuration loaded: {:?}", config);

    let store = Arc::new(SqliteStore::open("faultline.db")?);
    let monitor = Arc::new(
        ErrorMonitor::builder(config)
            .store(store)
            .build(),
    );
    monitor.start()?;

    // Synthetic fault generator standing in for a crashing UI
    let generator = {
        let monitor = Arc::clone(&monitor);
        tokio::spawn(async move {
            let mut seq: u64 = 0;
            loop {
                tokio::time::sleep(Duration::from_millis(750)).await;
                seq += 1;

                // Recorder events arrive continuously between faults
                for _ in 0..5 {
                    monitor.push_replay_event(serde_json::json!({
                        "type": "mouse_move",
                        "seq": seq,
                    }));
                }

                let roll = rand::thread_rng().gen_range(0..4u8);
                let event = match roll {
                    0 => RawEvent::Script {
                        message: format!("Uncaught TypeError #{}", seq),
                        filename: Some("app.js".to_string()),
                        lineno: Some(42),
                        colno: Some(7),
                    },
                    1 => RawEvent::Resource {
                        message: "Failed to load resource".to_string(),
                        tag: Some("IMG".to_string()),
                        url: Some(format!("https://cdn.example.com/{}.png", seq)),
                    },
                    2 => RawEvent::Promise {
                        message: format!("Unhandled rejection #{}", seq),
                    },
                    _ => RawEvent::Manual {
                        message: format!("Render crash #{}", seq),
                        stack: Some("at render (app.js:10:3)".to_string()),
                        component_stack: Some("in <CrashButton>\n  in <App>".to_string()),
                    },
                };

                monitor.capture(event).await;
            }
        })
    };

    // Graceful shutdown: flush whatever remains, then stop
    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal, flushing queue...");

    generator.abort();
    monitor.flush_on_exit().await;
    monitor.stop();

    info!("Demo stopped");
    Ok(())
}
