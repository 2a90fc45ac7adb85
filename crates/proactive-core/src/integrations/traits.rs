use async_trait::async_trait;

use super::trello::{BoardList, RawCard};
use crate::error::{InsightError, SourceError};

/// Where board cards come from.
///
/// Implementations report failures; callers decide whether to degrade
/// (see [`BoardSnapshot::fetch`](crate::snapshot::BoardSnapshot::fetch)).
#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Unique identifier (e.g. "trello").
    fn name(&self) -> &str;

    /// All cards on the board, with checklists and recent actions.
    async fn fetch_cards(&self) -> Result<Vec<RawCard>, SourceError>;

    /// All lists (columns) on the board.
    async fn fetch_lists(&self) -> Result<Vec<BoardList>, SourceError>;
}

/// Free-text generation used for task and project insights.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Unique identifier (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}
