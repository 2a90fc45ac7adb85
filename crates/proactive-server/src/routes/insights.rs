//! Model-backed endpoints. Model failures stay inside a successful body.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use proactive_core::error::ValidationError;
use proactive_core::integrations::insights;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub task_id: Option<String>,
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let task_id = payload
        .ok()
        .and_then(|Json(req)| req.task_id)
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingField("task_id"))?;

    let snapshot = state.snapshot().await;
    let task = snapshot
        .find(&task_id)
        .ok_or_else(|| ValidationError::TaskNotFound(task_id.clone()))?;

    let analysis = insights::analyze_task(state.insights.as_ref(), task).await;
    Ok(Json(json!({
        "success": true,
        "task_id": task_id,
        "task_title": task.task.title,
        "priority_score": task.priority_score,
        "priority_breakdown": task.priority_breakdown,
        "analysis": analysis,
    })))
}

pub async fn risk(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    if snapshot.is_empty() {
        return Json(json!({ "success": true, "message": insights::NO_TASKS_MESSAGE }));
    }
    let risk_analysis =
        insights::predict_project_risk(state.insights.as_ref(), &snapshot.ranked, snapshot.now)
            .await;
    Json(json!({
        "success": true,
        "risk_analysis": risk_analysis,
        "task_count": snapshot.len(),
    }))
}

pub async fn recommendations(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.snapshot().await;
    if snapshot.is_empty() {
        return Json(json!({ "success": true, "message": insights::NO_TASKS_MESSAGE }));
    }
    let recommendations = insights::recommend(state.insights.as_ref(), &snapshot.ranked).await;
    Json(json!({
        "success": true,
        "recommendations": recommendations,
        "analyzed_tasks": snapshot.len(),
    }))
}
