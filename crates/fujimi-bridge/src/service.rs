//! Maps inbound watch triggers onto scoring jobs and emits reports.

use crate::messages::{InboundMessage, OutboundMessage};
use fujimi_forecast::ForecastSource;
use fujimi_score::{Orchestrator, Scoreboard};
use tokio::sync::mpsc;

/// Bridge between the watch message protocol and the scoring engine.
///
/// Triggers are handled one at a time by the caller's receive loop, which
/// together with the orchestrator's per-point sequencing keeps the whole
/// refresh cycle a single sequential chain of requests.
pub struct ScoreBridge<S> {
    orchestrator: Orchestrator<S>,
    outbound: mpsc::Sender<OutboundMessage>,
}

impl<S: ForecastSource> ScoreBridge<S> {
    pub fn new(source: S, outbound: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            orchestrator: Orchestrator::new(source),
            outbound,
        }
    }

    /// Send the startup handshake.
    pub async fn announce_ready(&self) {
        self.send(OutboundMessage::Ready).await;
    }

    /// Handle one inbound message to completion.
    pub async fn handle(&self, message: InboundMessage) {
        match message {
            InboundMessage::Ready => {
                tracing::info!("Watch client is ready");
            }
            InboundMessage::UpdateAll => {
                tracing::info!("Refreshing all cells");
                match self.orchestrator.refresh_all().await {
                    Some(board) => self.send(scoreboard_message(board)).await,
                    // Withheld: a cell with no data must not produce a report
                    None => tracing::warn!("Full refresh produced no report"),
                }
            }
            InboundMessage::UpdateSingle { region, time } => {
                tracing::info!("Refreshing {} {}", region, time);
                match self.orchestrator.run_single(region, time).await {
                    Ok(score) => {
                        self.send(OutboundMessage::NewScore {
                            region,
                            time,
                            score,
                        })
                        .await;
                    }
                    Err(e) => {
                        tracing::warn!("No score for {} {}: {}", region, time, e);
                    }
                }
            }
        }
    }

    async fn send(&self, message: OutboundMessage) {
        tracing::info!("Posting to watch: {:?}", message);
        if self.outbound.send(message).await.is_err() {
            tracing::error!("Outbound channel closed; dropping message");
        }
    }
}

fn scoreboard_message(board: Scoreboard) -> OutboundMessage {
    OutboundMessage::NewScores {
        north_morning: board.north_morning,
        north_afternoon: board.north_afternoon,
        south_morning: board.south_morning,
        south_afternoon: board.south_afternoon,
    }
}
