//! Canonical task record built from one board card.
//!
//! A `Task` is rebuilt from a fresh board snapshot on every request and is
//! never mutated after construction. Scores live on
//! [`ScoredTask`](crate::scoring::ScoredTask), not here.

pub mod timestamp;

use serde::{Deserialize, Serialize};

pub use timestamp::{parse_timestamp, ParsedTimestamp};

/// Statuses treated as finished work.
pub const DONE_STATUSES: [&str; 2] = ["Done", "Completed"];

/// Statuses that count as in-flight work for staleness tracking.
pub const IN_FLIGHT_STATUSES: [&str; 3] = ["In Progress", "In Review", "Testing"];

/// Status assigned when a card's list is not on the board.
pub const UNKNOWN_STATUS: &str = "unknown";

/// One unit of work on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Name of the board list the card sits in.
    pub status: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    /// Raw board due date.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Raw board last-activity timestamp.
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub checklist_total: u32,
    #[serde(default)]
    pub checklist_completed: u32,
    /// Checklist progress, 0-100 with one decimal.
    #[serde(default)]
    pub completion_pct: f64,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default)]
    pub activity_count: u32,
}

impl Task {
    /// Create a task with the given id and title, everything else empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: UNKNOWN_STATUS.to_string(),
            assignees: Vec::new(),
            deadline: None,
            labels: Vec::new(),
            last_activity: None,
            url: String::new(),
            checklist_total: 0,
            checklist_completed: 0,
            completion_pct: 0.0,
            comment_count: 0,
            activity_count: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_assignee(mut self, member: impl Into<String>) -> Self {
        let member = member.into();
        if !self.assignees.contains(&member) {
            self.assignees.push(member);
        }
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
        self
    }

    /// Set the due date. Only the empty string means "no deadline".
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = non_empty(deadline.into());
        self
    }

    /// Set the last-activity timestamp. Empty strings mean "unknown".
    pub fn with_last_activity(mut self, last_activity: impl Into<String>) -> Self {
        self.last_activity = non_empty(last_activity.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set checklist counts. `completed` is capped at `total`.
    pub fn with_checklist(mut self, total: u32, completed: u32) -> Self {
        self.checklist_total = total;
        self.checklist_completed = completed.min(total);
        self.completion_pct = completion_pct(self.checklist_total, self.checklist_completed);
        self
    }

    pub fn with_engagement(mut self, comments: u32, activity: u32) -> Self {
        self.comment_count = comments;
        self.activity_count = activity;
        self
    }

    /// True when the task sits in a Done/Completed list.
    pub fn is_done(&self) -> bool {
        DONE_STATUSES.contains(&self.status.as_str())
    }

    /// True when the task is being worked on (staleness applies).
    pub fn is_in_flight(&self) -> bool {
        IN_FLIGHT_STATUSES.contains(&self.status.as_str())
    }

    pub fn deadline_parsed(&self) -> Option<ParsedTimestamp> {
        self.deadline.as_deref().map(parse_timestamp)
    }

    pub fn last_activity_parsed(&self) -> Option<ParsedTimestamp> {
        self.last_activity.as_deref().map(parse_timestamp)
    }

    /// Lower-cased title.
    pub fn title_lower(&self) -> String {
        self.title.to_lowercase()
    }

    /// Lower-cased description.
    pub fn description_lower(&self) -> String {
        self.description.to_lowercase()
    }

    /// True if any lower-cased label equals one of `candidates` (given in lower case).
    pub fn has_label_in(&self, candidates: &[&str]) -> bool {
        self.labels.iter().any(|label| {
            let label = label.to_lowercase();
            candidates.contains(&label.as_str())
        })
    }
}

/// `100 * completed / total`, rounded to one decimal; 0 for an empty checklist.
pub fn completion_pct(total: u32, completed: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = f64::from(completed.min(total)) / f64::from(total) * 100.0;
    (pct * 10.0).round_ties_even() / 10.0
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_pct_bounds() {
        assert_eq!(completion_pct(0, 0), 0.0);
        assert_eq!(completion_pct(3, 1), 33.3);
        assert_eq!(completion_pct(4, 4), 100.0);
        assert_eq!(completion_pct(2, 9), 100.0);
    }

    #[test]
    fn checklist_caps_completed_items() {
        let task = Task::new("t1", "Checklist").with_checklist(2, 5);
        assert_eq!(task.checklist_completed, 2);
        assert_eq!(task.completion_pct, 100.0);
    }

    #[test]
    fn status_sets() {
        assert!(Task::new("a", "x").with_status("Done").is_done());
        assert!(Task::new("a", "x").with_status("Completed").is_done());
        assert!(!Task::new("a", "x").with_status("done").is_done());
        assert!(Task::new("a", "x").with_status("In Review").is_in_flight());
        assert!(!Task::new("a", "x").with_status("Backlog").is_in_flight());
    }

    #[test]
    fn empty_timestamps_are_absent() {
        let task = Task::new("a", "x").with_deadline("").with_last_activity("");
        assert!(task.deadline.is_none());
        assert!(task.last_activity.is_none());
        assert!(task.deadline_parsed().is_none());
    }

    #[test]
    fn blank_timestamps_are_kept_and_unparseable() {
        let task = Task::new("a", "x").with_deadline("   ").with_last_activity(" ");
        assert_eq!(task.deadline.as_deref(), Some("   "));
        assert_eq!(task.deadline_parsed(), Some(ParsedTimestamp::Unparseable));
        assert_eq!(task.last_activity_parsed(), Some(ParsedTimestamp::Unparseable));
    }

    #[test]
    fn assignees_and_labels_are_sets() {
        let task = Task::new("a", "x")
            .with_assignee("m1")
            .with_assignee("m1")
            .with_label("Bug")
            .with_label("Bug");
        assert_eq!(task.assignees, vec!["m1"]);
        assert_eq!(task.labels, vec!["Bug"]);
        assert!(task.has_label_in(&["bug"]));
    }
}
