//! Ranked task list, top task, summary and factor breakdown.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use proactive_core::views;
use serde_json::{json, Value};

use super::Success;
use crate::AppState;

pub const NO_CARDS: &str = "No cards found. Check Trello credentials.";

pub async fn tasks(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    if snapshot.is_empty() {
        return Json(json!({ "success": false, "error": NO_CARDS, "cards_count": 0 }));
    }
    Json(json!({
        "success": true,
        "total_tasks": snapshot.len(),
        "statistics": views::task_statistics(&snapshot.ranked),
        "tasks": snapshot.ranked,
    }))
}

pub async fn next_task(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let Some(top) = views::top_task(&snapshot.ranked) else {
        return Json(json!({ "success": true, "message": "No tasks yet!" }));
    };
    Json(json!({
        "success": true,
        "message": format!("Top Priority: {}", top.task.task.title),
        "priority_score": format!("{}/100", top.task.priority_score),
        "task": top.task,
        "reasons": top.reasons,
        "recommendation": "Focus on this task first to maximize impact",
    }))
}

pub async fn summary(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    if snapshot.is_empty() {
        return Json(json!({ "success": true, "message": "No tasks found" }));
    }
    Json(json!({
        "success": true,
        "summary": views::project_summary(&snapshot.ranked, snapshot.now),
    }))
}

pub async fn priority_breakdown(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot().await;
    match views::breakdown_report(&snapshot.ranked, &snapshot.weights) {
        Some(report) => Json(Success::new(report)).into_response(),
        None => Json(json!({ "success": true, "message": "No tasks to analyze" })).into_response(),
    }
}
