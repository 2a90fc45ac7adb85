//! Trello integration -- board cards and lists via the Trello REST API.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use super::traits::TaskSource;
use crate::config::TrelloConfig;
use crate::error::SourceError;
use crate::task::{Task, UNKNOWN_STATUS};

const COMMENT_ACTION: &str = "commentCard";
const COMPLETE_STATE: &str = "complete";

/// A card as returned by `GET /1/boards/{id}/cards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub id_list: String,
    #[serde(default)]
    pub id_members: Vec<String>,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    #[serde(default)]
    pub date_last_activity: Option<String>,
    #[serde(default)]
    pub checklists: Vec<RawChecklist>,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLabel {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChecklist {
    #[serde(default)]
    pub check_items: Vec<RawCheckItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCheckItem {
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAction {
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A board list (column).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Map raw cards to canonical tasks, resolving list ids to status names.
pub fn normalize(cards: &[RawCard], lists: &[BoardList]) -> Vec<Task> {
    let list_names: HashMap<&str, &str> = lists
        .iter()
        .map(|l| (l.id.as_str(), l.name.as_str()))
        .collect();

    cards
        .iter()
        .map(|card| {
            let status = list_names
                .get(card.id_list.as_str())
                .copied()
                .unwrap_or(UNKNOWN_STATUS);

            let (total, completed) = card.checklists.iter().fold((0u32, 0u32), |acc, list| {
                let done = list
                    .check_items
                    .iter()
                    .filter(|item| item.state == COMPLETE_STATE)
                    .count() as u32;
                (acc.0 + list.check_items.len() as u32, acc.1 + done)
            });

            let comments = card
                .actions
                .iter()
                .filter(|a| a.kind == COMMENT_ACTION)
                .count() as u32;

            let mut task = Task::new(&card.id, &card.name)
                .with_description(card.desc.clone().unwrap_or_default())
                .with_status(status)
                .with_url(&card.url)
                .with_checklist(total, completed)
                .with_engagement(comments, card.actions.len() as u32);

            if let Some(due) = &card.due {
                task = task.with_deadline(due);
            }
            if let Some(last) = &card.date_last_activity {
                task = task.with_last_activity(last);
            }
            for member in &card.id_members {
                task = task.with_assignee(member);
            }
            for label in card.labels.iter().filter_map(|l| l.name.as_ref()) {
                task = task.with_label(label);
            }
            task
        })
        .collect()
}

/// Read-only Trello board client.
pub struct TrelloClient {
    config: TrelloConfig,
    http: Client,
}

impl TrelloClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(config: TrelloConfig, timeout: Duration) -> Self {
        let http = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default HTTP client");
            Client::new()
        });
        Self { config, http }
    }

    /// Whether key, token and board id are all set.
    pub fn is_configured(&self) -> bool {
        self.missing_field().is_none()
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.config.api_key.is_empty() {
            Some("api_key")
        } else if self.config.token.is_empty() {
            Some("token")
        } else if self.config.board_id.is_empty() {
            Some("board_id")
        } else {
            None
        }
    }

    fn board_url(&self, resource: &str, extra: &[(&str, &str)]) -> Result<Url, SourceError> {
        if let Some(field) = self.missing_field() {
            return Err(SourceError::NotConfigured {
                service: "trello",
                field,
            });
        }

        let base = self.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!(
            "{base}/1/boards/{}/{resource}",
            self.config.board_id
        ))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", &self.config.api_key);
            query.append_pair("token", &self.config.token);
            for (k, v) in extra {
                query.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let url = self.board_url(resource, extra)?;
        // Never log the query string: it carries credentials.
        let endpoint = format!("boards/{}/{resource}", self.config.board_id);

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| SourceError::Http {
                endpoint: endpoint.clone(),
                source: source.without_url(),
            })?;

        if !resp.status().is_success() {
            return Err(SourceError::Status {
                endpoint,
                status: resp.status().as_u16(),
            });
        }

        resp.json::<T>().await.map_err(|e| SourceError::Decode {
            endpoint,
            message: e.without_url().to_string(),
        })
    }
}

#[async_trait]
impl TaskSource for TrelloClient {
    fn name(&self) -> &str {
        "trello"
    }

    async fn fetch_cards(&self) -> Result<Vec<RawCard>, SourceError> {
        self.get_json(
            "cards",
            &[
                ("checklists", "all"),
                ("actions", "commentCard,updateCard"),
                ("fields", "all"),
            ],
        )
        .await
    }

    async fn fetch_lists(&self) -> Result<Vec<BoardList>, SourceError> {
        self.get_json("lists", &[]).await
    }
}
