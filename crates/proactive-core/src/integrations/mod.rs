//! External collaborators: the task board and the insight model.
//!
//! Both sit behind traits so the server and CLI can be driven by fakes in
//! tests.

pub mod gemini;
pub mod insights;
pub mod traits;
pub mod trello;

pub use gemini::GeminiClient;
pub use insights::{analyze_task, predict_project_risk, recommend, TaskInsightView};
pub use traits::{InsightProvider, TaskSource};
pub use trello::{normalize, BoardList, RawCard, TrelloClient};
