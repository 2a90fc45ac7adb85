//! HTTP API over the ProActive scoring engine.
//!
//! Every request takes a fresh board snapshot; nothing is cached between
//! requests. The only shared state is the read-only [`AppState`].

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use proactive_core::integrations::{GeminiClient, InsightProvider, TaskSource, TrelloClient};
use proactive_core::{BoardSnapshot, Config, PriorityCalculator, PriorityWeights};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod routes;

use error::ApiError;

/// Collaborators and scoring weights shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TaskSource>,
    pub insights: Arc<dyn InsightProvider>,
    pub weights: PriorityWeights,
}

impl AppState {
    pub fn new(
        source: Arc<dyn TaskSource>,
        insights: Arc<dyn InsightProvider>,
        weights: PriorityWeights,
    ) -> Self {
        Self {
            source,
            insights,
            weights,
        }
    }

    /// Trello and Gemini clients built from `config`.
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.http.timeout();
        Self::new(
            Arc::new(TrelloClient::new(config.trello.clone(), timeout)),
            Arc::new(GeminiClient::new(config.gemini.clone(), timeout)),
            config.scoring.weights,
        )
    }

    /// Fetch and score the board as of now.
    pub async fn snapshot(&self) -> BoardSnapshot {
        let calculator = PriorityCalculator::with_weights(self.weights);
        BoardSnapshot::fetch(self.source.as_ref(), &calculator).await
    }
}

/// Full application router with permissive CORS.
pub fn router(state: AppState) -> Router {
    routes::router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(panic_response))
}

fn panic_response(_panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    ApiError::Internal("Server error".to_string()).into_response()
}
