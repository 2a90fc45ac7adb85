//! Derived views over a ranked, scored board.
//!
//! All builders are pure: they take the ranked collection (and "now" where
//! deadlines or activity matter) and return owned, serializable results.

mod focus;
mod health;
mod workload;

pub use focus::{
    priority_reasons, quick_wins, today_focus, top_task, FocusTask, TopTask, FOCUS_LIMIT,
    HIGH_PRIORITY, QUICK_WIN_EFFORT,
};
pub use health::{
    average_priority, blockers, breakdown_report, overdue_tasks, priority_distribution,
    project_overview, project_summary, stale_tasks, task_statistics, BreakdownReport,
    HealthIndicators, OverdueTask, PriorityDistribution, ProjectOverview, ProjectSummary,
    StaleTask, TaskStatistics, STALE_THRESHOLD,
};
pub use workload::{team_workload, AssigneeLoad, TeamWorkload, WorkloadEntry};
