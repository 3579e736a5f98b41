//! reqwest-backed implementation of [`TaskService`].

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use sprintboard_core::{AppConfig, BoardError, BoardResult};
use sprintboard_domain::{TaskId, TaskStatus};
use std::time::Duration;
use tracing::debug;

use crate::service::{StatusPatch, TaskService};

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: AppConfig::default().request_timeout(),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct HttpTaskService {
    inner: reqwest::Client,
    config: ServiceConfig,
}

impl HttpTaskService {
    pub fn new(config: ServiceConfig) -> BoardResult<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BoardError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn token(&self) -> BoardResult<&str> {
        self.config
            .token
            .as_deref()
            .ok_or(BoardError::Unauthenticated)
    }

    async fn send(&self, request: RequestBuilder) -> BoardResult<Response> {
        let response = request
            .bearer_auth(self.token()?)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BoardError::Remote {
                status: status.as_u16(),
                message: remote_message(&body),
            });
        }
        Ok(response)
    }

    fn transport_error(&self, e: reqwest::Error) -> BoardError {
        if e.is_timeout() {
            BoardError::Timeout(self.config.timeout)
        } else {
            BoardError::Transport(e.to_string())
        }
    }
}

/// Pull the human-readable message out of an error body: `error` first,
/// then `detail`.
fn remote_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "detail"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> BoardResult<()> {
        let url = self.url(&format!("sprint-tasks/{}/", id));
        debug!("HTTP PATCH: {} -> {}", url, status);
        self.send(self.inner.patch(&url).json(&StatusPatch { status }))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        let url = self.url(&format!("sprint-tasks/{}/", id));
        debug!("HTTP DELETE: {}", url);
        self.send(self.inner.delete(&url)).await?;
        Ok(())
    }

    async fn fetch_sprint_tasks(&self, sprint_id: u64) -> BoardResult<Value> {
        let url = self.url(&format!("sprints/{}/", sprint_id));
        debug!("HTTP GET: {}", url);
        let response = self.send(self.inner.get(&url)).await?;
        let sprint: Value = response
            .json()
            .await
            .map_err(|e| BoardError::Serialization(e.to_string()))?;
        Ok(sprint.get("tasks").cloned().unwrap_or(Value::Null))
    }

    fn has_credentials(&self) -> bool {
        self.config.token.is_some()
    }
}
