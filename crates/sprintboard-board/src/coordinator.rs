//! Drag gesture state machine driving optimistic status moves.

use parking_lot::Mutex;
use serde_json::Value;
use sprintboard_client::TaskService;
use sprintboard_core::error::AUTH_REQUIRED_MESSAGE;
use sprintboard_core::{AppConfig, BoardError, BoardResult};
use sprintboard_domain::{
    AutoScroller, BoardStore, DropTarget, Point, ScrollContainer, ScrollDelta, Snapshot, TaskId,
    TaskStatus,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::debounce::{RefreshDebouncer, RefreshHook};
use crate::notice::Notices;
use crate::status_move::StatusMove;
use crate::transaction;

const MOVE_FAILED: &str = "Failed to update task status. Please try again.";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        active_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The task's previous move has not resolved yet
    InFlight,
    /// No bearer token, so nothing could be persisted
    Unauthenticated,
}

#[derive(Debug)]
pub enum TransactionOutcome {
    Committed,
    RolledBack(BoardError),
}

impl TransactionOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, TransactionOutcome::Committed)
    }
}

/// A status move that has been applied locally and is waiting on the remote.
#[derive(Debug)]
pub struct Transaction {
    pub id: Uuid,
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
    handle: JoinHandle<TransactionOutcome>,
}

impl Transaction {
    pub async fn outcome(self) -> TransactionOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(transaction = %self.id, "Transaction task failed: {}", e);
                TransactionOutcome::RolledBack(BoardError::Internal(e.to_string()))
            }
        }
    }
}

#[derive(Debug)]
pub enum DragOutcome {
    /// No gesture, no target, or a target that resolves to nothing
    Cancelled,
    /// Dropped where the task already is
    Unchanged,
    Rejected(RejectReason),
    Resolving(Transaction),
}

pub struct DragCoordinator {
    store: Arc<Mutex<BoardStore>>,
    service: Arc<dyn TaskService>,
    phase: DragPhase,
    scroller: AutoScroller,
    refresh: Arc<RefreshDebouncer>,
    in_flight: Arc<Mutex<HashSet<TaskId>>>,
    notices: Notices,
    request_timeout: Duration,
}

impl DragCoordinator {
    pub fn new(service: Arc<dyn TaskService>, config: &AppConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(BoardStore::new())),
            service,
            phase: DragPhase::Idle,
            scroller: AutoScroller::new(config.autoscroll.clone()),
            refresh: Arc::new(RefreshDebouncer::new(config.refresh_debounce(), None)),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            notices: Notices::new(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Install the host callback that refetches authoritative state.
    pub fn with_refresh_hook(mut self, hook: RefreshHook) -> Self {
        let delay = self.refresh.delay();
        self.refresh = Arc::new(RefreshDebouncer::new(delay, Some(hook)));
        self
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.lock().snapshot()
    }

    /// Mirror a new task collection from the host.
    pub fn replace_tasks(&self, raw: &Value) -> Snapshot {
        self.store.lock().replace(raw)
    }

    /// Entries discarded by the most recent [`Self::replace_tasks`].
    pub fn dropped_on_last_replace(&self) -> usize {
        self.store.lock().dropped_on_last_replace()
    }

    /// True while any move or delete is waiting on the remote.
    pub fn is_updating(&self) -> bool {
        !self.in_flight.lock().is_empty()
    }

    pub fn drag_start(&mut self, active_id: impl Into<String>) {
        let active_id = active_id.into();
        if let DragPhase::Dragging { active_id: previous } = &self.phase {
            debug!("Drag of {} superseded by {}", previous, active_id);
        }
        debug!("Drag started: {}", active_id);
        self.scroller.reset();
        self.phase = DragPhase::Dragging { active_id };
    }

    pub fn drag_over(
        &mut self,
        pointer: Point,
        container: &mut ScrollContainer,
    ) -> Option<ScrollDelta> {
        self.drag_over_at(pointer, container, Instant::now())
    }

    /// [`Self::drag_over`] with an explicit clock reading.
    pub fn drag_over_at(
        &mut self,
        pointer: Point,
        container: &mut ScrollContainer,
        now: Instant,
    ) -> Option<ScrollDelta> {
        match self.phase {
            DragPhase::Dragging { .. } => self.scroller.on_pointer_move(pointer, container, now),
            DragPhase::Idle => None,
        }
    }

    pub fn drag_cancel(&mut self) {
        if let DragPhase::Dragging { active_id } = std::mem::take(&mut self.phase) {
            debug!("Drag cancelled: {}", active_id);
        }
    }

    /// Finish the gesture over `over_id` (or over nothing).
    ///
    /// The local move is visible in the store before this returns; the remote
    /// commit runs on a spawned task. Must be called inside a tokio runtime.
    pub fn drag_end(&mut self, over_id: Option<&str>) -> DragOutcome {
        let DragPhase::Dragging { active_id } = std::mem::take(&mut self.phase) else {
            return DragOutcome::Cancelled;
        };
        let Some(over_id) = over_id else {
            debug!("Drag of {} ended outside any drop zone", active_id);
            return DragOutcome::Cancelled;
        };

        let snapshot = self.snapshot();
        let Some(task) = snapshot.find_by_drag_id(&active_id) else {
            debug!("Dragged task {} is no longer on the board", active_id);
            return DragOutcome::Cancelled;
        };

        let target = DropTarget::resolve(over_id, &snapshot);
        let Some(to) = target.target_status() else {
            debug!("Drop target {} did not resolve to a status", over_id);
            return DragOutcome::Cancelled;
        };
        if to == task.status {
            return DragOutcome::Unchanged;
        }

        if !self.service.has_credentials() {
            self.notices.error(AUTH_REQUIRED_MESSAGE);
            return DragOutcome::Rejected(RejectReason::Unauthenticated);
        }
        if !self.in_flight.lock().insert(task.id) {
            warn!("Task {} still has a move in flight, drop rejected", task.id);
            return DragOutcome::Rejected(RejectReason::InFlight);
        }

        let id = Uuid::new_v4();
        let (task_id, from) = (task.id, task.status);
        let title = target.zone_title();
        debug!(transaction = %id, "Moving task {} from {} to {}", task_id, from, to);

        let op = StatusMove::new(self.service.clone(), task_id, from, to);
        let applied = transaction::apply(self.store.clone(), op);

        let in_flight = self.in_flight.clone();
        let notices = self.notices.clone();
        let refresh = self.refresh.clone();
        let timeout = self.request_timeout;
        let handle = tokio::spawn(async move {
            let result = applied.commit(timeout).await;
            in_flight.lock().remove(&task_id);
            match result {
                Ok(()) => {
                    debug!(transaction = %id, "Move of task {} committed", task_id);
                    notices.success(format!("Task moved to {} successfully!", title));
                    refresh.schedule();
                    TransactionOutcome::Committed
                }
                Err(e) => {
                    warn!(transaction = %id, "Move of task {} rolled back: {}", task_id, e);
                    notices.error(e.user_message(MOVE_FAILED));
                    TransactionOutcome::RolledBack(e)
                }
            }
        });

        DragOutcome::Resolving(Transaction {
            id,
            task_id,
            from,
            to,
            handle,
        })
    }

    /// Delete a task remotely, then drop it from the store.
    ///
    /// The local removal only happens after the remote confirms.
    pub async fn delete_task(&self, id: TaskId) -> BoardResult<()> {
        if !self.service.has_credentials() {
            self.notices.error(AUTH_REQUIRED_MESSAGE);
            return Err(BoardError::Unauthenticated);
        }
        if self.store.lock().get(id).is_none() {
            return Err(BoardError::NotFound(format!("task {}", id)));
        }
        if !self.in_flight.lock().insert(id) {
            return Err(BoardError::Validation(format!(
                "task {} has an update in flight",
                id
            )));
        }

        let result = match tokio::time::timeout(self.request_timeout, self.service.delete_task(id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(BoardError::Timeout(self.request_timeout)),
        };
        self.in_flight.lock().remove(&id);

        match result {
            Ok(()) => {
                self.store.lock().remove(id);
                debug!("Task {} deleted", id);
                self.notices.success("Task deleted successfully!");
                self.refresh.schedule();
                Ok(())
            }
            Err(e) => {
                warn!("Delete of task {} failed: {}", id, e);
                self.notices.error(e.user_message(DELETE_FAILED));
                Err(e)
            }
        }
    }

    /// Acknowledge an edit the host has already persisted.
    pub fn task_edited(&self, id: TaskId) {
        debug!("Task {} edited", id);
        self.notices.success("Task updated successfully!");
        self.refresh.schedule();
    }
}
