pub mod board;
pub mod config;
pub mod insights;

use proactive_core::integrations::{GeminiClient, TrelloClient};
use proactive_core::{BoardSnapshot, Config, PriorityCalculator};
use serde::Serialize;

pub type CmdResult = proactive_core::Result<()>;

/// Board snapshot scored with the configured weights.
pub(crate) async fn load_snapshot(config: &Config) -> BoardSnapshot {
    let source = TrelloClient::new(config.trello.clone(), config.http.timeout());
    let calculator = PriorityCalculator::with_weights(config.scoring.weights);
    BoardSnapshot::fetch(&source, &calculator).await
}

pub(crate) fn insight_client(config: &Config) -> GeminiClient {
    GeminiClient::new(config.gemini.clone(), config.http.timeout())
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
