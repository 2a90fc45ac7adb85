//! One scored view of the board: fetch, normalize, score, rank.

use chrono::{DateTime, Utc};

use crate::integrations::{normalize, TaskSource};
use crate::scoring::{PriorityCalculator, PriorityWeights, ScoredTask};
use crate::task::Task;

/// Ranked tasks for a single request, scored against one fixed "now".
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub now: DateTime<Utc>,
    pub weights: PriorityWeights,
    /// Highest priority first; ties keep board order.
    pub ranked: Vec<ScoredTask>,
}

impl BoardSnapshot {
    pub fn from_tasks(tasks: &[Task], calculator: &PriorityCalculator) -> Self {
        Self {
            now: calculator.now(),
            weights: *calculator.weights(),
            ranked: calculator.rank_all(tasks),
        }
    }

    /// Fetch cards and lists concurrently and score them.
    ///
    /// Fetch failures are logged and treated as an empty result, so a dead
    /// board yields an empty snapshot rather than an error.
    pub async fn fetch(source: &dyn TaskSource, calculator: &PriorityCalculator) -> Self {
        let (cards, lists) = tokio::join!(source.fetch_cards(), source.fetch_lists());

        let cards = cards.unwrap_or_else(|e| {
            tracing::warn!(source = source.name(), error = %e, "card fetch failed");
            Vec::new()
        });
        let lists = lists.unwrap_or_else(|e| {
            tracing::warn!(source = source.name(), error = %e, "list fetch failed");
            Vec::new()
        });

        let tasks = normalize(&cards, &lists);
        tracing::debug!(cards = cards.len(), lists = lists.len(), "board fetched");
        Self::from_tasks(&tasks, calculator)
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// Look a task up by its exact id.
    pub fn find(&self, id: &str) -> Option<&ScoredTask> {
        self.ranked.iter().find(|t| t.task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SourceError;
    use crate::integrations::{BoardList, RawCard};
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct Board {
        cards: Vec<RawCard>,
        lists_fail: bool,
    }

    #[async_trait]
    impl TaskSource for Board {
        fn name(&self) -> &str {
            "memory"
        }

        async fn fetch_cards(&self) -> Result<Vec<RawCard>, SourceError> {
            Ok(self.cards.clone())
        }

        async fn fetch_lists(&self) -> Result<Vec<BoardList>, SourceError> {
            if self.lists_fail {
                Err(SourceError::Status {
                    endpoint: "boards/b/lists".into(),
                    status: 500,
                })
            } else {
                Ok(vec![BoardList { id: "l1".into(), name: "Done".into() }])
            }
        }
    }

    fn card(id: &str, name: &str) -> RawCard {
        RawCard {
            id: id.into(),
            name: name.into(),
            id_list: "l1".into(),
            ..Default::default()
        }
    }

    fn calculator() -> PriorityCalculator {
        PriorityCalculator::at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn fetch_scores_and_ranks() {
        let board = Board {
            cards: vec![card("a", "Write docs"), card("b", "Critical security fix")],
            lists_fail: false,
        };
        let snapshot = BoardSnapshot::fetch(&board, &calculator()).await;

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.ranked[0].task.id, "b");
        assert_eq!(snapshot.find("a").map(|t| t.task.status.as_str()), Some("Done"));
        assert!(snapshot.find("A").is_none());
    }

    #[tokio::test]
    async fn failed_list_fetch_degrades_to_unknown_status() {
        let board = Board {
            cards: vec![card("a", "Write docs")],
            lists_fail: true,
        };
        let snapshot = BoardSnapshot::fetch(&board, &calculator()).await;
        assert_eq!(snapshot.ranked[0].task.status, "unknown");
    }
}
