//! What to work on next: top task, quick wins, today's focus set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoredTask;
use crate::task::ParsedTimestamp;

/// Breakdown factors above this value produce a reason string.
pub const REASON_THRESHOLD: f64 = 70.0;
/// Effort score above which a task is a quick win.
pub const QUICK_WIN_EFFORT: f64 = 75.0;
/// Priority score above which a task is high priority.
pub const HIGH_PRIORITY: f64 = 75.0;
/// Maximum size of the daily focus set.
pub const FOCUS_LIMIT: usize = 10;

const DUE_SOON_HOURS: f64 = 48.0;
const FOCUS_QUICK_WIN_EFFORT: f64 = 80.0;
const FOCUS_QUICK_WIN_PRIORITY: f64 = 50.0;

/// The single highest-priority task with human-readable reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTask {
    pub task: ScoredTask,
    pub reasons: Vec<String>,
}

/// A task picked for today, with why it was picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusTask {
    #[serde(flatten)]
    pub task: ScoredTask,
    /// Comma-joined reason labels.
    pub focus_reason: String,
}

/// First task of a ranked collection, with reasons for every factor above 70.
pub fn top_task(ranked: &[ScoredTask]) -> Option<TopTask> {
    let task = ranked.first()?.clone();
    let reasons = priority_reasons(&task);
    Some(TopTask { task, reasons })
}

/// Reason strings for each breakdown factor above [`REASON_THRESHOLD`].
pub fn priority_reasons(task: &ScoredTask) -> Vec<String> {
    task.priority_breakdown
        .factors()
        .into_iter()
        .filter(|(_, value)| *value > REASON_THRESHOLD)
        .map(|(name, value)| {
            let label = match name {
                "urgency" => "High urgency",
                "strategic_value" => "High strategic value",
                "dependency_impact" => "Blocking other tasks",
                "effort_vs_impact" => "Quick win: low effort, high impact",
                "staleness" => "Stagnant task needs attention",
                _ => "High stakeholder engagement",
            };
            format!("{label} ({value}/100)")
        })
        .collect()
}

/// Open tasks with effort score above 75, best effort score first.
pub fn quick_wins(ranked: &[ScoredTask]) -> Vec<ScoredTask> {
    let mut wins: Vec<ScoredTask> = ranked
        .iter()
        .filter(|t| t.priority_breakdown.effort_vs_impact > QUICK_WIN_EFFORT && !t.task.is_done())
        .cloned()
        .collect();
    wins.sort_by(|a, b| {
        b.priority_breakdown
            .effort_vs_impact
            .total_cmp(&a.priority_breakdown.effort_vs_impact)
    });
    wins
}

/// Recommended focus set for today, at most [`FOCUS_LIMIT`] tasks.
///
/// An open task is included when it is high priority, due within the next
/// 48 hours, or a quick win with a priority above 50.
pub fn today_focus(ranked: &[ScoredTask], now: DateTime<Utc>) -> Vec<FocusTask> {
    let mut picked: Vec<FocusTask> = ranked
        .iter()
        .filter(|t| !t.task.is_done())
        .filter_map(|t| {
            let reasons = focus_reasons(t, now);
            if reasons.is_empty() {
                None
            } else {
                Some(FocusTask {
                    task: t.clone(),
                    focus_reason: reasons.join(", "),
                })
            }
        })
        .collect();

    picked.sort_by(|a, b| b.task.priority_score.total_cmp(&a.task.priority_score));
    picked.truncate(FOCUS_LIMIT);
    picked
}

fn focus_reasons(task: &ScoredTask, now: DateTime<Utc>) -> Vec<&'static str> {
    let mut reasons = Vec::new();
    let score = task.priority_score;

    if score > HIGH_PRIORITY {
        reasons.push("High priority");
    }

    if let Some(ParsedTimestamp::Valid(deadline)) = task.task.deadline_parsed() {
        let hours_until = (deadline - now).num_milliseconds() as f64 / 3_600_000.0;
        if hours_until > 0.0 && hours_until < DUE_SOON_HOURS {
            reasons.push("Due soon");
        }
    }

    if task.priority_breakdown.effort_vs_impact > FOCUS_QUICK_WIN_EFFORT
        && score > FOCUS_QUICK_WIN_PRIORITY
    {
        reasons.push("Quick win");
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PriorityBreakdown;
    use crate::task::Task;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap()
    }

    fn scored(id: &str, status: &str, score: f64, effort: f64) -> ScoredTask {
        ScoredTask {
            task: Task::new(id, id).with_status(status),
            priority_score: score,
            priority_breakdown: PriorityBreakdown {
                effort_vs_impact: effort,
                ..Default::default()
            },
            team_capacity: 40.0,
        }
    }

    #[test]
    fn top_task_reasons_cover_every_factor_above_70() {
        let mut task = scored("a", "To Do", 80.0, 90.0);
        task.priority_breakdown.urgency = 95.0;
        task.priority_breakdown.staleness = 70.0;
        task.priority_breakdown.engagement = 80.0;

        let top = top_task(&[task]).unwrap();
        assert_eq!(
            top.reasons,
            vec![
                "High urgency (95/100)",
                "Quick win: low effort, high impact (90/100)",
                "High stakeholder engagement (80/100)",
            ]
        );
    }

    #[test]
    fn top_task_of_empty_board() {
        assert!(top_task(&[]).is_none());
    }

    #[test]
    fn quick_wins_skip_done_and_sort_by_effort() {
        let ranked = vec![
            scored("a", "To Do", 70.0, 76.0),
            scored("b", "Done", 60.0, 90.0),
            scored("c", "To Do", 50.0, 90.0),
            scored("d", "To Do", 40.0, 75.0),
            scored("e", "Completed", 30.0, 95.0),
        ];
        let ids: Vec<_> = quick_wins(&ranked).into_iter().map(|t| t.task.id).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn focus_reasons_are_joined() {
        let mut task = scored("a", "To Do", 80.0, 90.0);
        task.task = task
            .task
            .with_deadline((now() + Duration::hours(5)).to_rfc3339());
        let focus = today_focus(&[task], now());
        assert_eq!(focus[0].focus_reason, "High priority, Due soon, Quick win");
    }

    #[test]
    fn past_deadline_is_not_due_soon() {
        let mut task = scored("a", "To Do", 40.0, 0.0);
        task.task = task
            .task
            .with_deadline((now() - Duration::hours(5)).to_rfc3339());
        assert!(today_focus(&[task], now()).is_empty());
    }

    #[test]
    fn focus_is_capped_and_sorted() {
        let ranked: Vec<_> = (0..15)
            .map(|i| scored(&format!("t{i}"), "To Do", 76.0 + i as f64, 0.0))
            .collect();
        let focus = today_focus(&ranked, now());
        assert_eq!(focus.len(), FOCUS_LIMIT);
        assert_eq!(focus[0].task.task.id, "t14");
        assert!(focus
            .windows(2)
            .all(|w| w[0].task.priority_score >= w[1].task.priority_score));
    }

    #[test]
    fn done_tasks_never_in_focus() {
        let ranked = vec![scored("a", "Done", 99.0, 99.0)];
        assert!(today_focus(&ranked, now()).is_empty());
    }
}
