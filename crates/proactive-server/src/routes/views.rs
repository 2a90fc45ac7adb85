//! Derived board views.

use axum::{extract::State, Json};
use proactive_core::views;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

fn counted<T: Serialize>(key: &str, items: &[T], message: String) -> Json<Value> {
    let mut body = json!({ "success": true, "count": items.len(), "message": message });
    body[key] = json!(items);
    Json(body)
}

pub async fn blockers(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let found = views::blockers(&snapshot.ranked);
    let message = if found.is_empty() {
        "No blockers found".to_string()
    } else {
        format!("Found {} blocking tasks", found.len())
    };
    counted("blockers", &found, message)
}

pub async fn quick_wins(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let found = views::quick_wins(&snapshot.ranked);
    let message = if found.is_empty() {
        "No quick wins available".to_string()
    } else {
        format!("Found {} quick win opportunities", found.len())
    };
    counted("quick_wins", &found, message)
}

pub async fn stale_tasks(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let found = views::stale_tasks(&snapshot.ranked, snapshot.now);
    let message = if found.is_empty() {
        "No stale tasks".to_string()
    } else {
        format!("{} tasks need attention", found.len())
    };
    counted("stale_tasks", &found, message)
}

pub async fn overdue(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let found = views::overdue_tasks(&snapshot.ranked, snapshot.now);
    let message = if found.is_empty() {
        "No overdue tasks".to_string()
    } else {
        format!("{} overdue tasks", found.len())
    };
    counted("overdue_tasks", &found, message)
}

pub async fn today(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    if snapshot.is_empty() {
        return Json(json!({ "success": true, "message": "No tasks for today" }));
    }
    let found = views::today_focus(&snapshot.ranked, snapshot.now);
    let message = format!("{} tasks recommended for today", found.len());
    counted("today_focus", &found, message)
}

pub async fn team_workload(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    let workload = views::team_workload(&snapshot.ranked);
    let mut body = json!(workload);
    body["success"] = json!(true);
    Json(body)
}
