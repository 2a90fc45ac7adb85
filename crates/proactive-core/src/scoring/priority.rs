//! Task priority calculation module.
//!
//! Calculates task priority scores (0-100) from six factors:
//! - Urgency (deadline proximity, overdue status)
//! - Strategic value (labels and business keywords)
//! - Dependency impact (blocking / blocked language, references from other cards)
//! - Effort vs impact (quick wins score high)
//! - Staleness (inactivity of in-flight work)
//! - Engagement (comment and activity volume)
//!
//! Each factor is weighted and summed into a normalized score. The factor
//! values are kept as a [`PriorityBreakdown`] for the derived views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dependency::{dependency_impact, ReferenceIndex, SubstringScan};
use super::factors;
use crate::task::Task;

/// Priority calculation weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Weight for urgency (default 0.30)
    #[serde(default = "default_urgency_weight")]
    pub urgency: f64,
    /// Weight for strategic value (default 0.25)
    #[serde(default = "default_strategic_weight")]
    pub strategic_value: f64,
    /// Weight for dependency impact (default 0.20)
    #[serde(default = "default_dependency_weight")]
    pub dependency_impact: f64,
    /// Weight for effort vs impact (default 0.10)
    #[serde(default = "default_effort_weight")]
    pub effort_vs_impact: f64,
    /// Weight for staleness (default 0.10)
    #[serde(default = "default_staleness_weight")]
    pub staleness: f64,
    /// Weight for engagement (default 0.05)
    #[serde(default = "default_engagement_weight")]
    pub engagement: f64,
}

fn default_urgency_weight() -> f64 {
    0.30
}
fn default_strategic_weight() -> f64 {
    0.25
}
fn default_dependency_weight() -> f64 {
    0.20
}
fn default_effort_weight() -> f64 {
    0.10
}
fn default_staleness_weight() -> f64 {
    0.10
}
fn default_engagement_weight() -> f64 {
    0.05
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            urgency: default_urgency_weight(),
            strategic_value: default_strategic_weight(),
            dependency_impact: default_dependency_weight(),
            effort_vs_impact: default_effort_weight(),
            staleness: default_staleness_weight(),
            engagement: default_engagement_weight(),
        }
    }
}

impl PriorityWeights {
    /// Weights rendered as whole percentages, in factor order.
    pub fn as_percentages(&self) -> [(&'static str, String); 6] {
        let pct = |w: f64| format!("{}%", (w * 100.0).round() as i64);
        [
            ("urgency", pct(self.urgency)),
            ("strategic_value", pct(self.strategic_value)),
            ("dependency_impact", pct(self.dependency_impact)),
            ("effort_vs_impact", pct(self.effort_vs_impact)),
            ("staleness", pct(self.staleness)),
            ("engagement", pct(self.engagement)),
        ]
    }
}

/// Per-factor scores behind a priority score, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub urgency: f64,
    pub strategic_value: f64,
    pub dependency_impact: f64,
    pub effort_vs_impact: f64,
    pub staleness: f64,
    pub engagement: f64,
}

impl PriorityBreakdown {
    /// Weighted sum, clamped to 0-100 and rounded to one decimal.
    pub fn weighted_score(&self, weights: &PriorityWeights) -> f64 {
        let raw = self.urgency * weights.urgency
            + self.strategic_value * weights.strategic_value
            + self.dependency_impact * weights.dependency_impact
            + self.effort_vs_impact * weights.effort_vs_impact
            + self.staleness * weights.staleness
            + self.engagement * weights.engagement;
        round1(raw).clamp(0.0, 100.0)
    }

    /// Factors as `(name, value)` pairs in published order.
    pub fn factors(&self) -> [(&'static str, f64); 6] {
        [
            ("urgency", self.urgency),
            ("strategic_value", self.strategic_value),
            ("dependency_impact", self.dependency_impact),
            ("effort_vs_impact", self.effort_vs_impact),
            ("staleness", self.staleness),
            ("engagement", self.engagement),
        ]
    }

    fn rounded(self) -> Self {
        Self {
            urgency: round1(self.urgency),
            strategic_value: round1(self.strategic_value),
            dependency_impact: round1(self.dependency_impact),
            effort_vs_impact: round1(self.effort_vs_impact),
            staleness: round1(self.staleness),
            engagement: round1(self.engagement),
        }
    }
}

/// A task together with its computed priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub priority_score: f64,
    pub priority_breakdown: PriorityBreakdown,
    /// Capacity by assignee count; reported but not weighted.
    pub team_capacity: f64,
}

/// Priority calculation configuration
#[derive(Debug, Clone)]
pub struct PriorityConfig {
    /// Weights for each factor
    pub weights: PriorityWeights,
    /// Reference time for deadline and staleness calculations
    pub current_time: DateTime<Utc>,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            weights: PriorityWeights::default(),
            current_time: Utc::now(),
        }
    }
}

/// Priority calculator for board tasks
pub struct PriorityCalculator {
    config: PriorityConfig,
}

impl PriorityCalculator {
    /// Create a new priority calculator with default config
    pub fn new() -> Self {
        Self {
            config: PriorityConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PriorityConfig) -> Self {
        Self { config }
    }

    /// Calculator with custom weights, pinned to the current time.
    pub fn with_weights(weights: PriorityWeights) -> Self {
        Self::with_config(PriorityConfig {
            weights,
            ..Default::default()
        })
    }

    /// Calculator with default weights pinned to `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::with_config(PriorityConfig {
            current_time: now,
            ..Default::default()
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.config.current_time
    }

    pub fn weights(&self) -> &PriorityWeights {
        &self.config.weights
    }

    /// Compute all six factors for one task.
    pub fn breakdown(&self, task: &Task, index: &dyn ReferenceIndex) -> PriorityBreakdown {
        let now = self.config.current_time;
        PriorityBreakdown {
            urgency: factors::urgency(task, now),
            strategic_value: factors::strategic_value(task),
            dependency_impact: dependency_impact(task, index),
            effort_vs_impact: factors::effort_impact(task),
            staleness: factors::staleness(task, now),
            engagement: factors::engagement(task),
        }
        .rounded()
    }

    /// Score one task against a reference index over its board.
    pub fn score(&self, task: &Task, index: &dyn ReferenceIndex) -> ScoredTask {
        let breakdown = self.breakdown(task, index);
        ScoredTask {
            priority_score: breakdown.weighted_score(&self.config.weights),
            priority_breakdown: breakdown,
            team_capacity: factors::team_capacity(task),
            task: task.clone(),
        }
    }

    /// Score every task, keeping input order.
    pub fn score_all(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        let index = SubstringScan::new(tasks);
        let scored: Vec<ScoredTask> = tasks.iter().map(|t| self.score(t, &index)).collect();
        tracing::debug!(count = scored.len(), "scored board tasks");
        scored
    }

    /// Score and rank, highest priority first.
    pub fn rank_all(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        let mut scored = self.score_all(tasks);
        sort_by_priority(&mut scored);
        scored
    }
}

impl Default for PriorityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable sort by priority score, highest first. Ties keep input order.
pub fn sort_by_priority(tasks: &mut [ScoredTask]) {
    tasks.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
}

/// One decimal place, ties to even.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
