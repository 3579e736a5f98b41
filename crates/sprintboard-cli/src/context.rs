use anyhow::Context;
use sprintboard_board::DragCoordinator;
use sprintboard_client::{HttpTaskService, ServiceConfig, TaskService};
use sprintboard_core::AppConfig;
use sprintboard_domain::Snapshot;
use std::path::Path;
use std::sync::Arc;

pub struct CliContext {
    pub coordinator: DragCoordinator,
    service: Arc<HttpTaskService>,
}

impl CliContext {
    /// Resolve configuration (flags and env over the config file) and build
    /// the remote service and an empty board.
    pub fn new(
        url: Option<String>,
        token: Option<String>,
        config_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::load_from(path)?,
            None => AppConfig::load(),
        };
        let base_url = url.or_else(|| config.base_url.clone()).context(
            "no task service URL: pass --url, set SPRINTBOARD_URL or base_url in the config file",
        )?;

        let service = Arc::new(HttpTaskService::new(
            ServiceConfig::new(base_url)
                .with_token(token)
                .with_timeout(config.request_timeout()),
        )?);
        let coordinator = DragCoordinator::new(service.clone(), &config);
        Ok(Self {
            coordinator,
            service,
        })
    }

    /// Fetch a sprint's tasks and mirror them into the board.
    pub async fn load_sprint(&self, sprint_id: u64) -> anyhow::Result<Snapshot> {
        let raw = self
            .service
            .fetch_sprint_tasks(sprint_id)
            .await
            .with_context(|| format!("failed to load sprint {}", sprint_id))?;
        let snapshot = self.coordinator.replace_tasks(&raw);
        tracing::debug!("Loaded {} tasks for sprint {}", snapshot.len(), sprint_id);
        Ok(snapshot)
    }
}
