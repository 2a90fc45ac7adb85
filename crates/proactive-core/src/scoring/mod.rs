//! Priority scoring engine.
//!
//! - [`factors`]: single-task calculators (urgency, strategic value, effort,
//!   staleness, capacity, engagement)
//! - [`dependency`]: board-wide dependency impact behind [`ReferenceIndex`]
//! - [`priority`]: weighted aggregation, breakdowns and ranking

pub mod dependency;
pub mod factors;
mod priority;

pub use dependency::{
    dependency_impact, has_blocker_language, is_blocked, ReferenceIndex, SubstringScan,
};
pub use priority::{
    sort_by_priority, PriorityBreakdown, PriorityCalculator, PriorityConfig, PriorityWeights,
    ScoredTask,
};
pub(crate) use priority::round1;
