//! Gemini integration -- single-shot `generateContent` calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::InsightProvider;
use crate::config::GeminiConfig;
use crate::error::InsightError;

/// Gemini REST client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, timeout: Duration) -> Self {
        if config.api_key.is_empty() {
            tracing::warn!("Gemini client created without API key; insights will be unavailable");
        }
        let http = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        });
        Self { config, http }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Concatenated text parts of the first candidate.
    fn parse_response(json: &Value) -> Result<String, InsightError> {
        let text: String = json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(InsightError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl InsightProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        if !self.is_configured() {
            return Err(InsightError::NotConfigured);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Http(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| InsightError::Http(e.without_url()))?;
        tracing::debug!(model = %self.config.model, "insight generated");
        Self::parse_response(&json)
    }
}
