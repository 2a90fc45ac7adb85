use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use super::ENDPOINTS;

const SERVICE: &str = "ProActive Intelligence Hub";
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "service": SERVICE,
        "message": "Task board prioritization API",
        "version": VERSION,
        "features": [
            "Six-factor priority scoring",
            "Dependency tracking",
            "Staleness detection",
            "Effort vs impact analysis",
            "AI-powered insights",
            "Project risk prediction",
        ],
        "endpoints": {
            "health": "/api/health",
            "tasks": "/api/tasks",
            "next_task": "/api/next-task",
            "summary": "/api/summary",
            "analyze": "/api/analyze (POST)",
            "risk": "/api/risk",
            "blockers": "/api/blockers",
            "quick_wins": "/api/quick-wins",
            "stale_tasks": "/api/stale-tasks",
            "overdue": "/api/overdue",
            "priority_breakdown": "/api/priority-breakdown",
            "today": "/api/today",
            "team_workload": "/api/team-workload",
            "recommendations": "/api/recommendations",
        },
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": format!("{SERVICE} is running"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": VERSION,
    }))
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "message": "The requested endpoint does not exist",
            "available_endpoints": ENDPOINTS,
        })),
    )
}
