//! Fujimi companion daemon.
//!
//! Speaks the watch protocol as JSON lines: inbound triggers on stdin,
//! outbound reports on stdout. The actual device transport (Pebble-style
//! app messages) is expected to sit on the other side of the pipe.

use anyhow::{Context, Result};
use fujimi_bridge::{InboundMessage, OutboundMessage, ScoreBridge};
use fujimi_core::Config;
use fujimi_forecast::OpenMeteoClient;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    fujimi_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let client = OpenMeteoClient::new(
        &config.forecast.base_url,
        Duration::from_secs(config.forecast.timeout_secs),
    )
    .context("Failed to create forecast client")?;

    let (outbound_tx, outbound_rx) = mpsc::channel::<OutboundMessage>(16);
    let writer = tokio::spawn(write_outbound(outbound_rx));

    let bridge = ScoreBridge::new(client, outbound_tx);
    bridge.announce_ready().await;
    tracing::info!("Fujimi companion started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<InboundMessage>(line) {
            // Triggers are handled one at a time; a refresh runs its whole
            // fetch chain before the next message is read
            Ok(message) => bridge.handle(message).await,
            Err(e) => tracing::warn!("Ignoring malformed message: {}", e),
        }
    }

    // stdin closed: drop the sender so the writer drains and exits
    drop(bridge);
    writer.await?;

    tracing::info!("Fujimi companion stopped");
    Ok(())
}

/// Drain outbound reports to stdout, one JSON object per line.
async fn write_outbound(mut outbound_rx: mpsc::Receiver<OutboundMessage>) {
    let mut stdout = tokio::io::stdout();
    while let Some(message) = outbound_rx.recv().await {
        let mut line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to serialize outbound message: {}", e);
                continue;
            }
        };
        line.push('\n');
        if stdout.write_all(line.as_bytes()).await.is_err() {
            tracing::error!("stdout closed; stopping outbound writer");
            return;
        }
        let _ = stdout.flush().await;
    }
}
