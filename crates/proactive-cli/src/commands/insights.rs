use proactive_core::error::ValidationError;
use proactive_core::integrations::insights;
use proactive_core::Config;
use serde_json::json;

use super::{insight_client, load_snapshot, print_json, CmdResult};

pub async fn analyze(task_id: &str) -> CmdResult {
    if task_id.trim().is_empty() {
        return Err(ValidationError::MissingField("task_id").into());
    }
    let config = Config::from_env();
    let snapshot = load_snapshot(&config).await;
    let task = snapshot
        .find(task_id)
        .ok_or_else(|| ValidationError::TaskNotFound(task_id.to_string()))?;

    let analysis = insights::analyze_task(&insight_client(&config), task).await;
    print_json(&json!({
        "task_id": task_id,
        "task_title": task.task.title,
        "priority_score": task.priority_score,
        "priority_breakdown": task.priority_breakdown,
        "analysis": analysis,
    }))
}

pub async fn risk() -> CmdResult {
    let config = Config::from_env();
    let snapshot = load_snapshot(&config).await;
    let text =
        insights::predict_project_risk(&insight_client(&config), &snapshot.ranked, snapshot.now)
            .await;
    println!("{text}");
    Ok(())
}

pub async fn recommend() -> CmdResult {
    let config = Config::from_env();
    let snapshot = load_snapshot(&config).await;
    if snapshot.is_empty() {
        println!("{}", insights::NO_TASKS_MESSAGE);
        return Ok(());
    }
    let text = insights::recommend(&insight_client(&config), &snapshot.ranked).await;
    println!("{text}");
    Ok(())
}
