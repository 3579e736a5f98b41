use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use sprintboard_core::BoardResult;
use sprintboard_domain::{TaskId, TaskStatus};
use std::sync::Arc;

/// Body of the partial update sent when a task changes column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPatch {
    pub status: TaskStatus,
}

/// The remote system that owns tasks.
///
/// Implementations report every failure (transport, timeout, non-2xx) as an
/// error; callers decide whether to roll back.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Persist a new status for one task
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> BoardResult<()>;

    /// Delete one task
    async fn delete_task(&self, id: TaskId) -> BoardResult<()>;

    /// Fetch the raw task collection of a sprint.
    ///
    /// The value is handed to the board store untouched, which copes with
    /// non-array input.
    async fn fetch_sprint_tasks(&self, sprint_id: u64) -> BoardResult<Value>;

    /// Whether requests can be authenticated at all
    fn has_credentials(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: TaskService + ?Sized> TaskService for Arc<T> {
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> BoardResult<()> {
        (**self).update_status(id, status).await
    }

    async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        (**self).delete_task(id).await
    }

    async fn fetch_sprint_tasks(&self, sprint_id: u64) -> BoardResult<Value> {
        (**self).fetch_sprint_tasks(sprint_id).await
    }

    fn has_credentials(&self) -> bool {
        (**self).has_credentials()
    }
}
