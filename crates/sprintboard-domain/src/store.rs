//! Board state store.
//!
//! Holds the locally cached copy of the sprint's tasks. The cache is an
//! immutable, shared [`Snapshot`]; every mutation produces a new snapshot so
//! that consumers can detect change by pointer identity instead of deep
//! comparison.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;

use crate::task::{Task, TaskId, TaskStatus};

/// Point-in-time, immutable list of the tasks on the board.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(Arc<Vec<Task>>);

impl Snapshot {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self(Arc::new(tasks))
    }

    /// Decode a raw task collection as supplied by the host.
    ///
    /// Anything that is not a JSON array becomes an empty snapshot. Entries
    /// whose id is missing, null or not a task id are dropped with a
    /// data-integrity warning; malformed values in any other field fall back
    /// to defaults. Returns the snapshot and the number of dropped entries.
    pub fn decode(raw: &Value) -> (Self, usize) {
        let Some(entries) = raw.as_array() else {
            if !raw.is_null() {
                tracing::warn!("Task list is not an array; showing an empty board");
            }
            return (Self::default(), 0);
        };

        let mut tasks = Vec::with_capacity(entries.len());
        let mut dropped = 0;
        for (index, entry) in entries.iter().enumerate() {
            if entry.get("id").map_or(true, Value::is_null) {
                tracing::warn!(index, "Task without ID found: {}", entry);
                dropped += 1;
                continue;
            }
            match serde_json::from_value::<Task>(entry.clone()) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    tracing::warn!(index, "Skipping task with unusable ID: {}", e);
                    dropped += 1;
                }
            }
        }
        (Self::new(tasks), dropped)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.0
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.0.iter().find(|task| task.id == id)
    }

    /// Look a task up by its drag identifier.
    pub fn find_by_drag_id(&self, drag_id: &str) -> Option<&Task> {
        let id: TaskId = drag_id.parse().ok()?;
        self.get(id)
    }

    /// True when both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tasks().serialize(serializer)
    }
}

impl Deref for Snapshot {
    type Target = [Task];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Owner of the board's single mutable resource.
#[derive(Debug, Default)]
pub struct BoardStore {
    snapshot: Snapshot,
    dropped_on_last_replace: usize,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            snapshot: Snapshot::new(tasks),
            dropped_on_last_replace: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.clone()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.snapshot.get(id).cloned()
    }

    /// Entries discarded by the most recent [`BoardStore::replace`].
    pub fn dropped_on_last_replace(&self) -> usize {
        self.dropped_on_last_replace
    }

    /// Replace the whole snapshot from raw host input.
    pub fn replace(&mut self, raw: &Value) -> Snapshot {
        let (snapshot, dropped) = Snapshot::decode(raw);
        tracing::debug!(
            tasks = snapshot.len(),
            dropped,
            "Replacing board snapshot"
        );
        self.snapshot = snapshot;
        self.dropped_on_last_replace = dropped;
        self.snapshot()
    }

    pub fn replace_tasks(&mut self, tasks: Vec<Task>) -> Snapshot {
        self.snapshot = Snapshot::new(tasks);
        self.dropped_on_last_replace = 0;
        self.snapshot()
    }

    /// Change one task's status, keeping every other field and the order.
    ///
    /// Returns the current snapshot unchanged when `id` is not present.
    pub fn patch_status(&mut self, id: TaskId, status: TaskStatus) -> Snapshot {
        if self.snapshot.get(id).is_none() {
            return self.snapshot();
        }
        let tasks = self
            .snapshot
            .iter()
            .map(|task| {
                if task.id == id {
                    task.with_status(status)
                } else {
                    task.clone()
                }
            })
            .collect();
        self.snapshot = Snapshot::new(tasks);
        self.snapshot()
    }

    /// Drop one task. Returns the current snapshot unchanged when `id` is not
    /// present.
    pub fn remove(&mut self, id: TaskId) -> Snapshot {
        if self.snapshot.get(id).is_none() {
            return self.snapshot();
        }
        let tasks = self
            .snapshot
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.snapshot = Snapshot::new(tasks);
        self.snapshot()
    }
}
