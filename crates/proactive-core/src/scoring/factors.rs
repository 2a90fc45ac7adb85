//! Single-task factor calculators.
//!
//! Every calculator returns a score in `0.0..=100.0`. Rule tables are checked
//! top to bottom and the first match wins, so the order of the `if` chains
//! below is part of the scoring contract.

use chrono::{DateTime, Utc};

use crate::task::{ParsedTimestamp, Task};

/// Urgency when the card has no due date.
pub const URGENCY_NO_DEADLINE: f64 = 15.0;
/// Urgency when the due date cannot be parsed.
pub const URGENCY_UNPARSEABLE: f64 = 25.0;
/// Staleness for tasks outside the in-flight lists.
pub const STALENESS_NOT_APPLICABLE: f64 = 20.0;
/// Staleness for in-flight tasks with no activity timestamp.
pub const STALENESS_NO_ACTIVITY: f64 = 50.0;
/// Staleness when the activity timestamp cannot be parsed.
pub const STALENESS_UNPARSEABLE: f64 = 40.0;

const CRITICAL_LABELS: [&str; 4] = ["critical", "blocker", "emergency", "urgent"];
const HIGH_LABELS: [&str; 3] = ["high", "important", "high priority"];
const SECURITY_KEYWORDS: [&str; 4] = ["security", "vulnerability", "compliance", "audit"];
const BUG_KEYWORDS: [&str; 5] = ["bug", "error", "crash", "broken", "fix"];
const BUSINESS_KEYWORDS: [&str; 4] = ["user-facing", "revenue", "customer", "production"];
const LOW_LABELS: [&str; 4] = ["low", "nice to have", "enhancement", "future"];

const QUICK_WIN_KEYWORDS: [&str; 9] = [
    "typo",
    "rename",
    "update text",
    "copy change",
    "wording",
    "small fix",
    "quick",
    "simple",
    "minor",
];
const COMPLEX_KEYWORDS: [&str; 7] = [
    "refactor",
    "rebuild",
    "redesign",
    "architecture",
    "migration",
    "infrastructure",
    "integration",
];

/// Lower-cased title and description, computed once per task.
pub(crate) struct TaskText {
    pub title: String,
    pub description: String,
}

impl TaskText {
    pub fn of(task: &Task) -> Self {
        Self {
            title: task.title_lower(),
            description: task.description_lower(),
        }
    }

    /// True if any keyword occurs in the title or the description.
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .any(|k| self.title.contains(k) || self.description.contains(k))
    }
}

/// Deadline urgency.
///
/// Overdue tasks score 90/95/100 by how late they are; upcoming deadlines
/// fall into fixed windows measured in fractional hours.
pub fn urgency(task: &Task, now: DateTime<Utc>) -> f64 {
    match task.deadline_parsed() {
        None => URGENCY_NO_DEADLINE,
        Some(ParsedTimestamp::Unparseable) => {
            tracing::warn!(task_id = %task.id, "deadline unparseable, using fallback urgency");
            URGENCY_UNPARSEABLE
        }
        Some(ParsedTimestamp::Valid(deadline)) => urgency_for(deadline, now),
    }
}

fn urgency_for(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours_until = (deadline - now).num_milliseconds() as f64 / 3_600_000.0;
    let days_until = hours_until / 24.0;

    if hours_until < 0.0 {
        let days_overdue = days_until.abs();
        return if days_overdue > 7.0 {
            100.0
        } else if days_overdue > 3.0 {
            95.0
        } else {
            90.0
        };
    }

    if hours_until < 6.0 {
        95.0
    } else if hours_until < 24.0 {
        85.0
    } else if days_until <= 2.0 {
        75.0
    } else if days_until <= 4.0 {
        60.0
    } else if days_until <= 7.0 {
        45.0
    } else if days_until <= 14.0 {
        30.0
    } else {
        20.0
    }
}

/// Strategic value from labels and keywords.
///
/// Security keywords are checked before bug keywords on purpose.
pub fn strategic_value(task: &Task) -> f64 {
    let text = TaskText::of(task);

    if task.has_label_in(&CRITICAL_LABELS) {
        95.0
    } else if task.has_label_in(&HIGH_LABELS) {
        80.0
    } else if text.mentions_any(&SECURITY_KEYWORDS) {
        85.0
    } else if text.mentions_any(&BUG_KEYWORDS) {
        75.0
    } else if text.mentions_any(&BUSINESS_KEYWORDS) {
        70.0
    } else if task.has_label_in(&LOW_LABELS) {
        25.0
    } else {
        50.0
    }
}

/// Effort vs impact. High means a cheap, valuable task.
pub fn effort_impact(task: &Task) -> f64 {
    let text = TaskText::of(task);

    if text.mentions_any(&QUICK_WIN_KEYWORDS) {
        return 90.0;
    }
    if text.mentions_any(&COMPLEX_KEYWORDS) {
        return 35.0;
    }

    match task.checklist_total {
        n if n > 10 => return 30.0,
        n if n > 5 => return 45.0,
        n if n > 0 => return 65.0,
        _ => {}
    }

    match text.description.chars().count() {
        n if n > 1000 => 40.0,
        n if n > 500 => 55.0,
        n if n > 100 => 70.0,
        n if n > 0 => 75.0,
        _ => 60.0,
    }
}

/// Whole days since last activity, if the timestamp parses.
pub fn days_since_activity(task: &Task, now: DateTime<Utc>) -> Option<i64> {
    task.last_activity_parsed()
        .and_then(ParsedTimestamp::valid)
        .map(|last| (now - last).num_days())
}

/// Inactivity penalty for in-flight tasks.
pub fn staleness(task: &Task, now: DateTime<Utc>) -> f64 {
    if !task.is_in_flight() {
        return STALENESS_NOT_APPLICABLE;
    }

    let last = match task.last_activity_parsed() {
        None => return STALENESS_NO_ACTIVITY,
        Some(ParsedTimestamp::Unparseable) => {
            tracing::warn!(task_id = %task.id, "last activity unparseable, using fallback staleness");
            return STALENESS_UNPARSEABLE;
        }
        Some(ParsedTimestamp::Valid(last)) => last,
    };

    match (now - last).num_days() {
        d if d > 14 => 95.0,
        d if d > 7 => 85.0,
        d if d > 4 => 70.0,
        d if d > 2 => 50.0,
        _ => 25.0,
    }
}

/// Capacity by number of assignees. Not part of the weighted score.
pub fn team_capacity(task: &Task) -> f64 {
    match task.assignees.len() {
        0 => 40.0,
        1 => 75.0,
        2 => 85.0,
        _ => 70.0,
    }
}

/// Stakeholder engagement from comment and activity volume.
pub fn engagement(task: &Task) -> f64 {
    let (comments, activity) = (task.comment_count, task.activity_count);

    if comments > 10 || activity > 20 {
        80.0
    } else if comments > 5 || activity > 10 {
        65.0
    } else if comments > 2 || activity > 5 {
        50.0
    } else if comments > 0 || activity > 0 {
        40.0
    } else {
        30.0
    }
}
