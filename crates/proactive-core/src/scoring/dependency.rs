//! Dependency impact scoring.
//!
//! There are no explicit edges between cards. A task "blocks" others when
//! their free text mentions its id or the first 20 characters of its title.
//! Counting those mentions goes through [`ReferenceIndex`] so the linear scan
//! can be swapped for an indexed lookup without changing scores.

use super::factors::TaskText;
use crate::task::Task;

/// Language that marks a task as blocking other work.
pub const BLOCKER_TERMS: [&str; 3] = ["blocker", "blocking", "blocks"];

/// Language that marks a task as waiting on other work.
pub const BLOCKED_BY_TERMS: [&str; 3] = ["blocked by", "waiting for", "depends on"];

/// Characters of the title used as a reference key.
pub const TITLE_PREFIX_CHARS: usize = 20;

const BASE_SCORE: f64 = 20.0;
const BLOCKER_BONUS: f64 = 50.0;
const PER_REFERENCE: f64 = 20.0;
const REFERENCE_CAP: f64 = 40.0;
const BLOCKED_PENALTY: f64 = 30.0;

/// Counts how many other tasks reference a given task.
pub trait ReferenceIndex {
    /// Number of tasks other than `task` whose text refers to it.
    fn referencing_count(&self, task: &Task) -> usize;
}

/// Brute-force [`ReferenceIndex`]: scans the whole collection per lookup.
///
/// O(n) per task, O(n²) per board. Fine for boards with hundreds of cards.
pub struct SubstringScan<'a> {
    entries: Vec<ScanEntry<'a>>,
}

struct ScanEntry<'a> {
    id: &'a str,
    title: String,
    description: String,
}

impl<'a> SubstringScan<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        let entries = tasks
            .iter()
            .map(|t| ScanEntry {
                id: t.id.as_str(),
                title: t.title_lower(),
                description: t.description_lower(),
            })
            .collect();
        Self { entries }
    }
}

impl ReferenceIndex for SubstringScan<'_> {
    fn referencing_count(&self, task: &Task) -> usize {
        let prefix = title_prefix(&task.title);
        self.entries
            .iter()
            .filter(|other| other.id != task.id)
            .filter(|other| {
                other.description.contains(task.id.as_str())
                    || other.description.contains(prefix.as_str())
                    || other.title.contains(prefix.as_str())
            })
            .count()
    }
}

/// First [`TITLE_PREFIX_CHARS`] characters of the lower-cased title.
///
/// An empty title yields an empty prefix, which every other task "mentions".
pub fn title_prefix(title: &str) -> String {
    title.to_lowercase().chars().take(TITLE_PREFIX_CHARS).collect()
}

/// True when the title or description carries blocker language.
pub fn has_blocker_language(task: &Task) -> bool {
    TaskText::of(task).mentions_any(&BLOCKER_TERMS)
}

/// True when the description says the task waits on something else.
pub fn is_blocked(task: &Task) -> bool {
    let description = task.description_lower();
    BLOCKED_BY_TERMS.iter().any(|term| description.contains(term))
}

/// Dependency impact of `task` given an index over the whole board.
pub fn dependency_impact(task: &Task, index: &dyn ReferenceIndex) -> f64 {
    let mut score = BASE_SCORE;

    if has_blocker_language(task) {
        score += BLOCKER_BONUS;
    }

    let references = index.referencing_count(task) as f64;
    score += (references * PER_REFERENCE).min(REFERENCE_CAP);

    if is_blocked(task) {
        score -= BLOCKED_PENALTY;
    }

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl ReferenceIndex for Fixed {
        fn referencing_count(&self, _task: &Task) -> usize {
            self.0
        }
    }

    #[test]
    fn referenced_twice_scores_sixty() {
        let tasks = vec![
            Task::new("abc123", "Set up CI pipeline"),
            Task::new("t2", "Deploy").with_description("Needs abc123 done first"),
            Task::new("t3", "Release").with_description("after set up ci pipeline lands"),
            Task::new("t4", "Unrelated"),
        ];
        let index = SubstringScan::new(&tasks);
        assert_eq!(index.referencing_count(&tasks[0]), 2);
        assert_eq!(dependency_impact(&tasks[0], &index), 60.0);
    }

    #[test]
    fn title_prefix_matches_other_titles() {
        let tasks = vec![
            Task::new("a", "Payment gateway"),
            Task::new("b", "Payment gateway follow-up"),
        ];
        let index = SubstringScan::new(&tasks);
        assert_eq!(index.referencing_count(&tasks[0]), 1);
        assert_eq!(index.referencing_count(&tasks[1]), 0);
    }

    #[test]
    fn prefix_is_twenty_chars() {
        assert_eq!(title_prefix("Implement the OAuth login flow"), "implement the oauth ");
        assert_eq!(title_prefix("Short"), "short");
    }

    #[test]
    fn reference_bonus_is_capped() {
        let task = Task::new("t", "Core");
        assert_eq!(dependency_impact(&task, &Fixed(5)), 60.0);
    }

    #[test]
    fn blocker_and_blocked_adjustments() {
        let blocker = Task::new("t", "API contract").with_description("This blocks the mobile team");
        assert_eq!(dependency_impact(&blocker, &Fixed(0)), 70.0);

        let title_blocker = Task::new("t", "Blocking: schema freeze");
        assert!(has_blocker_language(&title_blocker));

        let blocked = Task::new("t", "UI").with_description("Waiting for design sign-off");
        assert_eq!(dependency_impact(&blocked, &Fixed(0)), 0.0);

        let both = Task::new("t", "Auth").with_description("Blocker. Depends on vendor keys");
        assert_eq!(dependency_impact(&both, &Fixed(2)), 80.0);
    }
}
