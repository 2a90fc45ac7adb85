use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::AppState;

pub mod board;
pub mod insights;
pub mod meta;
pub mod views;

/// Every endpoint, listed in the fallback 404 payload.
pub const ENDPOINTS: [&str; 14] = [
    "/api/health",
    "/api/tasks",
    "/api/next-task",
    "/api/summary",
    "/api/analyze",
    "/api/risk",
    "/api/blockers",
    "/api/quick-wins",
    "/api/stale-tasks",
    "/api/recommendations",
    "/api/overdue",
    "/api/priority-breakdown",
    "/api/today",
    "/api/team-workload",
];

/// `{"success": true, ...fields of T}`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meta::root))
        .route("/api/health", get(meta::health))
        .route("/api/tasks", get(board::tasks))
        .route("/api/next-task", get(board::next_task))
        .route("/api/summary", get(board::summary))
        .route("/api/priority-breakdown", get(board::priority_breakdown))
        .route("/api/blockers", get(views::blockers))
        .route("/api/quick-wins", get(views::quick_wins))
        .route("/api/stale-tasks", get(views::stale_tasks))
        .route("/api/overdue", get(views::overdue))
        .route("/api/today", get(views::today))
        .route("/api/team-workload", get(views::team_workload))
        .route("/api/analyze", post(insights::analyze))
        .route("/api/risk", get(insights::risk))
        .route("/api/recommendations", get(insights::recommendations))
        .fallback(meta::not_found)
}
