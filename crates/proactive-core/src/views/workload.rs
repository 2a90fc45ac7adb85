//! Open work grouped by assignee.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::focus::HIGH_PRIORITY;
use crate::scoring::{round1, ScoredTask};

/// Compact task entry listed under an assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub id: String,
    pub title: String,
    pub priority: f64,
    pub status: String,
    pub team_capacity: f64,
}

/// Load carried by one board member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssigneeLoad {
    pub task_count: usize,
    pub high_priority_count: usize,
    pub total_priority_score: f64,
    pub avg_priority: f64,
    pub tasks: Vec<WorkloadEntry>,
}

/// Workload across the team. Unassigned tasks are kept apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWorkload {
    /// Keyed by member id, in order of first appearance.
    pub workload_by_assignee: IndexMap<String, AssigneeLoad>,
    pub unassigned_count: usize,
    pub unassigned_tasks: Vec<ScoredTask>,
    pub total_team_members: usize,
}

/// Group open tasks by assignee.
///
/// A task with several assignees is counted once under each of them.
pub fn team_workload(ranked: &[ScoredTask]) -> TeamWorkload {
    let mut workload: IndexMap<String, AssigneeLoad> = IndexMap::new();
    let mut unassigned_tasks = Vec::new();

    for scored in ranked.iter().filter(|t| !t.task.is_done()) {
        if scored.task.assignees.is_empty() {
            unassigned_tasks.push(scored.clone());
            continue;
        }

        for member in &scored.task.assignees {
            let load = workload.entry(member.clone()).or_default();
            load.task_count += 1;
            load.total_priority_score += scored.priority_score;
            if scored.priority_score > HIGH_PRIORITY {
                load.high_priority_count += 1;
            }
            load.tasks.push(WorkloadEntry {
                id: scored.task.id.clone(),
                title: scored.task.title.clone(),
                priority: scored.priority_score,
                status: scored.task.status.clone(),
                team_capacity: scored.team_capacity,
            });
        }
    }

    for load in workload.values_mut() {
        load.total_priority_score = round1(load.total_priority_score);
        load.avg_priority = if load.task_count > 0 {
            round1(load.total_priority_score / load.task_count as f64)
        } else {
            0.0
        };
    }

    TeamWorkload {
        total_team_members: workload.len(),
        unassigned_count: unassigned_tasks.len(),
        workload_by_assignee: workload,
        unassigned_tasks,
    }
}
