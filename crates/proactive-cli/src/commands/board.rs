//! Board commands: ranked tasks and derived views, printed as JSON.

use clap::Subcommand;
use proactive_core::views;
use proactive_core::{Config, CoreError};
use serde_json::json;

use super::{load_snapshot, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ViewKind {
    /// Tasks that block other work
    Blockers,
    /// Low-effort, high-impact open tasks
    QuickWins,
    /// In-flight tasks with no recent activity
    Stale,
    /// Tasks past their due date
    Overdue,
    /// Recommended focus set for today
    Today,
    /// Open work grouped by assignee
    Workload,
}

pub async fn tasks() -> CmdResult {
    let snapshot = load_snapshot(&Config::from_env()).await;
    if snapshot.is_empty() {
        return Err(CoreError::EmptyBoard);
    }
    print_json(&json!({
        "total_tasks": snapshot.len(),
        "statistics": views::task_statistics(&snapshot.ranked),
        "tasks": snapshot.ranked,
    }))
}

pub async fn next() -> CmdResult {
    let snapshot = load_snapshot(&Config::from_env()).await;
    match views::top_task(&snapshot.ranked) {
        Some(top) => print_json(&top),
        None => {
            println!("No tasks yet");
            Ok(())
        }
    }
}

pub async fn view(kind: ViewKind) -> CmdResult {
    let snapshot = load_snapshot(&Config::from_env()).await;
    let (ranked, now) = (&snapshot.ranked, snapshot.now);
    match kind {
        ViewKind::Blockers => print_json(&views::blockers(ranked)),
        ViewKind::QuickWins => print_json(&views::quick_wins(ranked)),
        ViewKind::Stale => print_json(&views::stale_tasks(ranked, now)),
        ViewKind::Overdue => print_json(&views::overdue_tasks(ranked, now)),
        ViewKind::Today => print_json(&views::today_focus(ranked, now)),
        ViewKind::Workload => print_json(&views::team_workload(ranked)),
    }
}

pub async fn summary() -> CmdResult {
    let snapshot = load_snapshot(&Config::from_env()).await;
    if snapshot.is_empty() {
        println!("No tasks found");
        return Ok(());
    }
    print_json(&views::project_summary(&snapshot.ranked, snapshot.now))
}

pub async fn breakdown() -> CmdResult {
    let snapshot = load_snapshot(&Config::from_env()).await;
    match views::breakdown_report(&snapshot.ranked, &snapshot.weights) {
        Some(report) => print_json(&report),
        None => {
            println!("No tasks to analyze");
            Ok(())
        }
    }
}
