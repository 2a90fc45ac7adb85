//! Board health views: blockers, stale and overdue work, summaries.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::focus::HIGH_PRIORITY;
use crate::scoring::{has_blocker_language, round1, PriorityBreakdown, PriorityWeights, ScoredTask};
use crate::task::ParsedTimestamp;

/// Staleness score above which an in-flight task is reported as stale.
pub const STALE_THRESHOLD: f64 = 70.0;
/// Lower bound (inclusive) of the medium priority band.
pub const MEDIUM_PRIORITY: f64 = 50.0;
/// Characters of each title shown in the project overview.
pub const OVERVIEW_TITLE_CHARS: usize = 40;
/// Number of titles shown in the project overview.
pub const OVERVIEW_TOP_N: usize = 5;

/// An in-flight task that has gone quiet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaleTask {
    #[serde(flatten)]
    pub task: ScoredTask,
    /// Whole days since last activity; `None` when the timestamp is unusable.
    pub days_stale: Option<i64>,
}

/// A task past its due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueTask {
    #[serde(flatten)]
    pub task: ScoredTask,
    pub days_overdue: i64,
}

/// High / medium / low priority counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Aggregate numbers for the task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub average_priority: f64,
    pub high_priority_count: usize,
    pub medium_priority_count: usize,
    pub low_priority_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub overdue_tasks: usize,
    pub stale_tasks: usize,
    pub blocked_tasks: usize,
}

/// Whole-project summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub total_tasks: usize,
    /// Percentage of Done/Completed tasks, rounded.
    pub completion_rate: u32,
    pub by_status: IndexMap<String, usize>,
    pub priority_distribution: PriorityDistribution,
    pub health_indicators: HealthIndicators,
    pub average_priority: f64,
}

/// Average factor scores across the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub total_tasks: usize,
    pub average_scores: PriorityBreakdown,
    pub weights: IndexMap<String, String>,
    pub interpretation: IndexMap<String, String>,
}

/// Project-level counts handed to the insight model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOverview {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub stale: usize,
    pub average_priority: f64,
    pub high_priority_count: usize,
    /// Titles of the five highest-priority tasks, truncated to 40 characters.
    pub top_titles: Vec<String>,
}

/// Tasks labelled "blocker" or carrying blocker language.
pub fn blockers(ranked: &[ScoredTask]) -> Vec<ScoredTask> {
    ranked
        .iter()
        .filter(|t| t.task.has_label_in(&["blocker"]) || has_blocker_language(&t.task))
        .cloned()
        .collect()
}

/// In-flight tasks with staleness above 70, stalest first.
pub fn stale_tasks(ranked: &[ScoredTask], now: DateTime<Utc>) -> Vec<StaleTask> {
    let mut stale: Vec<StaleTask> = ranked
        .iter()
        .filter(|t| is_stale(t))
        .map(|t| StaleTask {
            days_stale: crate::scoring::factors::days_since_activity(&t.task, now),
            task: t.clone(),
        })
        .collect();
    stale.sort_by(|a, b| {
        b.task
            .priority_breakdown
            .staleness
            .total_cmp(&a.task.priority_breakdown.staleness)
    });
    stale
}

/// Tasks whose parsed deadline is before `now`, most overdue first.
///
/// Unparseable deadlines are skipped.
pub fn overdue_tasks(ranked: &[ScoredTask], now: DateTime<Utc>) -> Vec<OverdueTask> {
    let mut overdue: Vec<OverdueTask> = ranked
        .iter()
        .filter_map(|t| {
            let deadline = overdue_deadline(t, now)?;
            Some(OverdueTask {
                days_overdue: (now - deadline).num_days(),
                task: t.clone(),
            })
        })
        .collect();
    overdue.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
    overdue
}

/// Average priority and priority-band counts.
pub fn task_statistics(tasks: &[ScoredTask]) -> TaskStatistics {
    let distribution = priority_distribution(tasks);
    TaskStatistics {
        average_priority: average_priority(tasks),
        high_priority_count: distribution.high,
        medium_priority_count: distribution.medium,
        low_priority_count: distribution.low,
    }
}

pub fn priority_distribution(tasks: &[ScoredTask]) -> PriorityDistribution {
    let mut dist = PriorityDistribution::default();
    for t in tasks {
        let score = t.priority_score;
        if score > HIGH_PRIORITY {
            dist.high += 1;
        } else if score >= MEDIUM_PRIORITY {
            dist.medium += 1;
        } else {
            dist.low += 1;
        }
    }
    dist
}

/// Mean priority score rounded to one decimal; 0 for an empty board.
pub fn average_priority(tasks: &[ScoredTask]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let total: f64 = tasks.iter().map(|t| t.priority_score).sum();
    round1(total / tasks.len() as f64)
}

/// Status distribution, completion rate, priority bands and health counts.
pub fn project_summary(tasks: &[ScoredTask], now: DateTime<Utc>) -> ProjectSummary {
    let mut by_status: IndexMap<String, usize> = IndexMap::new();
    for t in tasks {
        *by_status.entry(t.task.status.clone()).or_insert(0) += 1;
    }

    let done = tasks.iter().filter(|t| t.task.is_done()).count();
    let completion_rate = if tasks.is_empty() {
        0
    } else {
        (done as f64 / tasks.len() as f64 * 100.0).round_ties_even() as u32
    };

    let blocked_tasks = tasks
        .iter()
        .filter(|t| {
            let description = t.task.description_lower();
            description.contains("blocked") || description.contains("waiting")
        })
        .count();

    ProjectSummary {
        total_tasks: tasks.len(),
        completion_rate,
        by_status,
        priority_distribution: priority_distribution(tasks),
        health_indicators: HealthIndicators {
            overdue_tasks: count_overdue(tasks, now),
            stale_tasks: count_stale_scores(tasks),
            blocked_tasks,
        },
        average_priority: average_priority(tasks),
    }
}

/// Per-factor averages with the published weights. `None` for an empty board.
pub fn breakdown_report(tasks: &[ScoredTask], weights: &PriorityWeights) -> Option<BreakdownReport> {
    if tasks.is_empty() {
        return None;
    }

    let n = tasks.len() as f64;
    let mean = |f: fn(&PriorityBreakdown) -> f64| {
        round1(tasks.iter().map(|t| f(&t.priority_breakdown)).sum::<f64>() / n)
    };
    let average_scores = PriorityBreakdown {
        urgency: mean(|b| b.urgency),
        strategic_value: mean(|b| b.strategic_value),
        dependency_impact: mean(|b| b.dependency_impact),
        effort_vs_impact: mean(|b| b.effort_vs_impact),
        staleness: mean(|b| b.staleness),
        engagement: mean(|b| b.engagement),
    };

    let weights = weights
        .as_percentages()
        .into_iter()
        .map(|(name, pct)| (name.to_string(), pct))
        .collect();

    let interpretation = [
        ("urgency", "Based on deadline proximity and overdue status"),
        ("strategic_value", "Based on labels, keywords, and business impact"),
        ("dependency_impact", "How many tasks this blocks or is blocked by"),
        ("effort_vs_impact", "Quick wins score (low effort, high impact)"),
        ("staleness", "How long task has been inactive in progress"),
        ("engagement", "Comments and activity level"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Some(BreakdownReport {
        total_tasks: tasks.len(),
        average_scores,
        weights,
        interpretation,
    })
}

/// Counts and top titles used for project-level insight prompts.
pub fn project_overview(tasks: &[ScoredTask], now: DateTime<Utc>) -> ProjectOverview {
    let mut ranked: Vec<&ScoredTask> = tasks.iter().collect();
    ranked.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    ProjectOverview {
        total: tasks.len(),
        done: tasks.iter().filter(|t| t.task.is_done()).count(),
        in_progress: tasks.iter().filter(|t| t.task.status == "In Progress").count(),
        overdue: count_overdue(tasks, now),
        stale: count_stale_scores(tasks),
        average_priority: average_priority(tasks),
        high_priority_count: tasks.iter().filter(|t| t.priority_score > HIGH_PRIORITY).count(),
        top_titles: ranked
            .into_iter()
            .take(OVERVIEW_TOP_N)
            .map(|t| t.task.title.chars().take(OVERVIEW_TITLE_CHARS).collect())
            .collect(),
    }
}

fn is_stale(task: &ScoredTask) -> bool {
    task.priority_breakdown.staleness > STALE_THRESHOLD && task.task.is_in_flight()
}

fn count_stale_scores(tasks: &[ScoredTask]) -> usize {
    tasks
        .iter()
        .filter(|t| t.priority_breakdown.staleness > STALE_THRESHOLD)
        .count()
}

fn overdue_deadline(task: &ScoredTask, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match task.task.deadline_parsed()? {
        ParsedTimestamp::Valid(deadline) if deadline < now => Some(deadline),
        _ => None,
    }
}

fn count_overdue(tasks: &[ScoredTask], now: DateTime<Utc>) -> usize {
    tasks
        .iter()
        .filter(|t| overdue_deadline(t, now).is_some())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PriorityCalculator;
    use crate::task::Task;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn ago(days: i64) -> String {
        (now() - Duration::days(days)).to_rfc3339()
    }

    #[test]
    fn blockers_by_label_or_language() {
        let tasks = vec![
            Task::new("a", "Schema").with_label("Blocker"),
            Task::new("b", "Auth").with_description("This blocks checkout"),
            Task::new("c", "Docs"),
        ];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let mut ids: Vec<_> = blockers(&ranked).into_iter().map(|t| t.task.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn stale_view_only_in_flight() {
        let tasks = vec![
            Task::new("a", "Old review").with_status("In Review").with_last_activity(ago(10)),
            Task::new("b", "Old done").with_status("Done").with_last_activity(ago(30)),
            Task::new("c", "Ancient").with_status("In Progress").with_last_activity(ago(20)),
            Task::new("d", "Fresh").with_status("Testing").with_last_activity(ago(1)),
        ];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let stale = stale_tasks(&ranked, now());
        let ids: Vec<_> = stale.iter().map(|t| t.task.task.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(stale[0].days_stale, Some(20));
        assert_eq!(stale[1].days_stale, Some(10));
    }

    #[test]
    fn overdue_sorted_by_days() {
        let tasks = vec![
            Task::new("a", "Late").with_deadline(ago(2)),
            Task::new("b", "Later").with_deadline(ago(9)),
            Task::new("c", "Garbled").with_deadline("tomorrow-ish"),
            Task::new("d", "Future").with_deadline((now() + Duration::days(3)).to_rfc3339()),
        ];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let overdue = overdue_tasks(&ranked, now());
        let got: Vec<_> = overdue
            .iter()
            .map(|t| (t.task.task.id.as_str(), t.days_overdue))
            .collect();
        assert_eq!(got, vec![("b", 9), ("a", 2)]);
    }

    #[test]
    fn summary_counts() {
        let tasks = vec![
            Task::new("a", "One").with_status("Done"),
            Task::new("b", "Two").with_status("In Progress").with_last_activity(ago(20)),
            Task::new("c", "Three").with_status("To Do").with_description("Waiting for API"),
            Task::new("d", "Four").with_status("To Do").with_deadline(ago(1)),
        ];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let summary = project_summary(&ranked, now());
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.completion_rate, 25);
        assert_eq!(summary.by_status.get("To Do"), Some(&2));
        assert_eq!(summary.health_indicators.overdue_tasks, 1);
        assert_eq!(summary.health_indicators.stale_tasks, 1);
        assert_eq!(summary.health_indicators.blocked_tasks, 1);
        let dist = summary.priority_distribution;
        assert_eq!(dist.high + dist.medium + dist.low, 4);
    }

    #[test]
    fn breakdown_report_averages() {
        let tasks = vec![Task::new("a", "One"), Task::new("b", "Two").with_label("urgent")];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let report = breakdown_report(&ranked, &PriorityWeights::default()).unwrap();
        assert_eq!(report.total_tasks, 2);
        assert_eq!(report.average_scores.strategic_value, 72.5);
        assert_eq!(report.weights.get("urgency").map(String::as_str), Some("30%"));
        assert!(breakdown_report(&[], &PriorityWeights::default()).is_none());
    }

    #[test]
    fn overview_truncates_titles() {
        let long = "A very long task title that keeps going and going";
        let tasks = vec![Task::new("a", long)];
        let ranked = PriorityCalculator::at(now()).rank_all(&tasks);
        let overview = project_overview(&ranked, now());
        assert_eq!(overview.top_titles[0].chars().count(), OVERVIEW_TITLE_CHARS);
        assert_eq!(overview.total, 1);
    }
}
