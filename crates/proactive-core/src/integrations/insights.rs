//! Insight prompts and their soft-failing wrappers.
//!
//! Each wrapper returns plain text: the model's answer, or a short
//! "... unavailable: <reason>" line when the model call fails.

use chrono::{DateTime, Utc};
use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use super::traits::InsightProvider;
use crate::error::InsightError;
use crate::scoring::{sort_by_priority, PriorityBreakdown, ScoredTask};
use crate::views::{project_overview, ProjectOverview};

/// Characters of the description included in a task prompt.
const DESCRIPTION_CHARS: usize = 500;
/// Characters of an error message kept in a fallback string.
const ERROR_CHARS: usize = 100;
/// Tasks listed in the recommendation prompt.
const RECOMMEND_TOP_N: usize = 10;

pub const NO_TASKS_MESSAGE: &str = "No tasks to analyze";

/// Read-only projection of a task handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInsightView {
    pub title: String,
    pub description: String,
    pub status: String,
    pub deadline: Option<String>,
    pub labels: Vec<String>,
    pub completion_pct: f64,
    pub priority_score: f64,
    pub priority_breakdown: PriorityBreakdown,
    pub assignee_count: usize,
    pub last_activity: Option<String>,
}

impl From<&ScoredTask> for TaskInsightView {
    fn from(scored: &ScoredTask) -> Self {
        let task = &scored.task;
        Self {
            title: task.title.clone(),
            description: task.description.chars().take(DESCRIPTION_CHARS).collect(),
            status: task.status.clone(),
            deadline: task.deadline.clone(),
            labels: task.labels.clone(),
            completion_pct: task.completion_pct,
            priority_score: scored.priority_score,
            priority_breakdown: scored.priority_breakdown,
            assignee_count: task.assignees.len(),
            last_activity: task.last_activity.clone(),
        }
    }
}

pub fn task_analysis_prompt(view: &TaskInsightView) -> String {
    let description = if view.description.is_empty() {
        "No description"
    } else {
        view.description.as_str()
    };
    let labels = if view.labels.is_empty() {
        "none".to_string()
    } else {
        view.labels.join(", ")
    };
    let b = &view.priority_breakdown;

    formatdoc! {"
        Analyze this project task and provide a brief, actionable insight (3-4 sentences max):

        Task: {title}
        Description: {description}
        Status: {status}
        Due: {due}
        Labels: {labels}
        Progress: {progress}% complete
        Priority Score: {score}/100
        Assignees: {assignees}
        Last Activity: {activity}

        Priority Factors:
        - Urgency: {urgency}/100
        - Strategic: {strategic}/100
        - Dependencies: {dependency}/100
        - Effort: {effort}/100

        Provide:
        1. Risk assessment (LOW/MEDIUM/HIGH/CRITICAL)
        2. Key concern or opportunity
        3. One specific, actionable recommendation
        4. Estimated time to complete (if possible)

        Keep it brief, professional, and actionable.
        ",
        title = view.title,
        description = description,
        labels = labels,
        status = view.status,
        due = view.deadline.as_deref().unwrap_or("No deadline"),
        progress = view.completion_pct,
        score = view.priority_score,
        assignees = view.assignee_count,
        activity = view.last_activity.as_deref().unwrap_or("Unknown"),
        urgency = b.urgency,
        strategic = b.strategic_value,
        dependency = b.dependency_impact,
        effort = b.effort_vs_impact,
    }
}

pub fn project_risk_prompt(overview: &ProjectOverview) -> String {
    let completed_pct = if overview.total > 0 {
        (overview.done as f64 / overview.total as f64 * 100.0).round_ties_even()
    } else {
        0.0
    };
    let top = overview
        .top_titles
        .iter()
        .map(|t| format!("\"{t}\""))
        .collect::<Vec<_>>()
        .join(", ");

    formatdoc! {"
        Analyze project health and predict risks:

        Project Metrics:
        - Total Tasks: {total}
        - Completed: {done} ({completed_pct}%)
        - In Progress: {in_progress}
        - Overdue: {overdue}
        - Stale Tasks (>7 days): {stale}
        - Average Priority: {avg}/100
        - High Priority Tasks: {high}

        Recent high-priority tasks: [{top}]

        Provide (4-5 sentences):
        1. Overall Risk Level: LOW/MEDIUM/HIGH/CRITICAL
        2. Primary concern or bottleneck
        3. Secondary concern (if any)
        4. One immediate action to take
        5. One strategic recommendation

        Be direct, specific, and actionable.
        ",
        total = overview.total,
        completed_pct = completed_pct,
        top = top,
        done = overview.done,
        in_progress = overview.in_progress,
        overdue = overview.overdue,
        stale = overview.stale,
        avg = overview.average_priority,
        high = overview.high_priority_count,
    }
}

pub fn recommendations_prompt(tasks: &[ScoredTask]) -> String {
    let mut ranked = tasks.to_vec();
    sort_by_priority(&mut ranked);

    let summary = ranked
        .iter()
        .take(RECOMMEND_TOP_N)
        .map(|t| {
            let due: String = t
                .task
                .deadline
                .as_deref()
                .map(|d| d.chars().take(10).collect())
                .unwrap_or_else(|| "None".to_string());
            format!(
                "- [{}/100] {} (Status: {}, Due: {})",
                t.priority_score, t.task.title, t.task.status, due
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    formatdoc! {"
        Review the top 10 priority tasks and provide strategic recommendations:

        {summary}

        Provide:
        1. Should priorities be adjusted? (Yes/No and why)
        2. Which task should be tackled FIRST today?
        3. Any tasks that could be delegated or postponed?
        4. Recommended focus areas for this week

        Be concise (4-5 sentences total).
        ",
        summary = summary,
    }
}

/// Model analysis of a single task.
pub async fn analyze_task(provider: &dyn InsightProvider, task: &ScoredTask) -> String {
    let prompt = task_analysis_prompt(&TaskInsightView::from(task));
    or_unavailable("Analysis", provider.generate(&prompt).await)
}

/// Model risk prediction for the whole board.
pub async fn predict_project_risk(
    provider: &dyn InsightProvider,
    tasks: &[ScoredTask],
    now: DateTime<Utc>,
) -> String {
    if tasks.is_empty() {
        return NO_TASKS_MESSAGE.to_string();
    }
    let prompt = project_risk_prompt(&project_overview(tasks, now));
    or_unavailable("Risk prediction", provider.generate(&prompt).await)
}

/// Model recommendations over the ten highest-priority tasks.
pub async fn recommend(provider: &dyn InsightProvider, tasks: &[ScoredTask]) -> String {
    let prompt = recommendations_prompt(tasks);
    or_unavailable("Recommendations", provider.generate(&prompt).await)
}

fn or_unavailable(what: &str, result: Result<String, InsightError>) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "{what} failed");
            let reason: String = e.to_string().chars().take(ERROR_CHARS).collect();
            format!("{what} unavailable: {reason}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::PriorityCalculator;
    use crate::task::Task;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct Echo {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InsightProvider for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("ok".to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl InsightProvider for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, InsightError> {
            Err(InsightError::Status {
                status: 503,
                body: "x".repeat(300),
            })
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn ranked() -> Vec<ScoredTask> {
        let tasks = vec![
            Task::new("1", "Fix login bug")
                .with_label("critical")
                .with_deadline("2025-06-02T00:00:00Z"),
            Task::new("2", "Write docs"),
        ];
        PriorityCalculator::at(now()).rank_all(&tasks)
    }

    #[test]
    fn task_prompt_fills_defaults() {
        let prompt = task_analysis_prompt(&TaskInsightView::from(&ranked()[1]));
        assert!(prompt.contains("Task: Write docs"));
        assert!(prompt.contains("Description: No description"));
        assert!(prompt.contains("Due: No deadline"));
        assert!(prompt.contains("Labels: none"));
    }

    #[test]
    fn view_truncates_description() {
        let mut scored = ranked().remove(0);
        scored.task.description = "a".repeat(900);
        let view = TaskInsightView::from(&scored);
        assert_eq!(view.description.chars().count(), DESCRIPTION_CHARS);
    }

    #[test]
    fn recommendation_lines_use_date_part() {
        let prompt = recommendations_prompt(&ranked());
        assert!(prompt.contains("Fix login bug (Status: unknown, Due: 2025-06-02)"));
        assert!(prompt.contains("Write docs (Status: unknown, Due: None)"));
    }

    #[tokio::test]
    async fn risk_without_tasks_skips_the_model() {
        let echo = Echo { prompts: Mutex::new(Vec::new()) };
        assert_eq!(predict_project_risk(&echo, &[], now()).await, NO_TASKS_MESSAGE);
        assert!(echo.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn risk_prompt_carries_board_counts() {
        let echo = Echo { prompts: Mutex::new(Vec::new()) };
        assert_eq!(predict_project_risk(&echo, &ranked(), now()).await, "ok");
        let prompts = echo.prompts.lock().unwrap();
        assert!(prompts[0].contains("Total Tasks: 2"));
        assert!(prompts[0].contains("\"Fix login bug\""));
    }

    #[tokio::test]
    async fn failures_become_truncated_fallbacks() {
        let text = analyze_task(&Failing, &ranked()[0]).await;
        assert!(text.starts_with("Analysis unavailable: model returned HTTP 503"));
        let reason = text.trim_start_matches("Analysis unavailable: ");
        assert_eq!(reason.chars().count(), ERROR_CHARS);

        assert!(recommend(&Failing, &ranked())
            .await
            .starts_with("Recommendations unavailable: "));
        assert!(predict_project_risk(&Failing, &ranked(), now())
            .await
            .starts_with("Risk prediction unavailable: "));
    }
}
