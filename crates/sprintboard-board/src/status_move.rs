use async_trait::async_trait;
use sprintboard_client::TaskService;
use sprintboard_core::{BoardResult, Optimistic};
use sprintboard_domain::{BoardStore, TaskId, TaskStatus};
use std::sync::Arc;

/// Moving one task to a new status: patched locally first, then persisted.
///
/// Compensation writes `from` back, which is only the task's status and
/// leaves any other field a concurrent replace brought in untouched.
pub struct StatusMove {
    service: Arc<dyn TaskService>,
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

impl StatusMove {
    pub fn new(
        service: Arc<dyn TaskService>,
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> Self {
        Self {
            service,
            task_id,
            from,
            to,
        }
    }
}

#[async_trait]
impl Optimistic<BoardStore> for StatusMove {
    type Output = ();

    fn apply(&self, store: &mut BoardStore) {
        store.patch_status(self.task_id, self.to);
    }

    async fn commit(&self) -> BoardResult<()> {
        self.service.update_status(self.task_id, self.to).await
    }

    fn compensate(&self, store: &mut BoardStore) {
        store.patch_status(self.task_id, self.from);
    }

    fn description(&self) -> String {
        format!("move task {} from {} to {}", self.task_id, self.from, self.to)
    }
}
