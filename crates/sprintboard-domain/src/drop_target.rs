//! Resolution of the identifier a drag gesture ended over.
//!
//! Sub-sections, columns and task cards all register drop ids in the same
//! string namespace (`"in_progress"` is both a column and a sub-section).
//! Resolution checks them in a fixed order: sub-section, then column, then
//! task sibling.

use crate::column::{Column, SubSection};
use crate::task::{Task, TaskId, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    SubSection(&'static SubSection),
    Column(&'static Column),
    /// Another task card; the dragged task adopts its status.
    TaskSibling { id: TaskId, status: TaskStatus },
    Unknown(String),
}

impl DropTarget {
    pub fn resolve(over_id: &str, tasks: &[Task]) -> Self {
        if let Some(sub_section) = SubSection::find(over_id) {
            return DropTarget::SubSection(sub_section);
        }
        if let Some(column) = Column::find(over_id) {
            return DropTarget::Column(column);
        }
        let sibling = over_id
            .parse::<TaskId>()
            .ok()
            .and_then(|id| tasks.iter().find(|task| task.id == id));
        match sibling {
            Some(task) => DropTarget::TaskSibling {
                id: task.id,
                status: task.status,
            },
            None => DropTarget::Unknown(over_id.to_string()),
        }
    }

    /// Status a task dropped here ends up with, or `None` when the drop
    /// should be treated as cancelled.
    pub fn target_status(&self) -> Option<TaskStatus> {
        match self {
            DropTarget::SubSection(sub_section) => Some(sub_section.status),
            DropTarget::Column(column) => Some(column.status),
            DropTarget::TaskSibling { status, .. } if status.is_known() => Some(*status),
            DropTarget::TaskSibling { .. } | DropTarget::Unknown(_) => None,
        }
    }

    /// Name of the zone shown in the "moved to" notice.
    pub fn zone_title(&self) -> &'static str {
        match self {
            DropTarget::SubSection(sub_section) => sub_section.title,
            DropTarget::Column(column) => column.title,
            DropTarget::TaskSibling { status, .. } => Column::for_status(*status)
                .map(|column| column.title)
                .unwrap_or(""),
            DropTarget::Unknown(_) => "",
        }
    }
}
