//! ProActive core -- priority scoring for task boards.
//!
//! Cards are fetched from a [`TaskSource`](integrations::TaskSource),
//! normalized into [`Task`]s, scored on six weighted factors and ranked.
//! The [`views`] module derives focus lists, health summaries and team
//! workload from the ranked board. Insight prompts for an external text
//! model live in [`integrations::insights`].

pub mod config;
pub mod error;
pub mod integrations;
pub mod scoring;
pub mod snapshot;
pub mod task;
pub mod views;

pub use config::Config;
pub use error::{CoreError, Result};
pub use scoring::{PriorityBreakdown, PriorityCalculator, PriorityWeights, ScoredTask};
pub use snapshot::BoardSnapshot;
pub use task::Task;
