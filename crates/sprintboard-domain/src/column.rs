use serde::Serialize;

use crate::task::TaskStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in_progress",
            ColumnId::InReview => "in_review",
            ColumnId::Done => "done",
        }
    }
}

/// A nested drop zone inside a column that holds exactly one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubSection {
    pub id: &'static str,
    pub title: &'static str,
    pub status: TaskStatus,
}

impl SubSection {
    /// Look up a sub-section across all columns by its drop id.
    pub fn find(id: &str) -> Option<&'static SubSection> {
        COLUMNS
            .iter()
            .flat_map(|column| column.sub_sections.iter())
            .find(|sub| sub.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: &'static str,
    /// Status given to a task dropped on the column itself.
    pub status: TaskStatus,
    pub sub_sections: &'static [SubSection],
}

const IN_PROGRESS_SECTIONS: [SubSection; 2] = [
    SubSection {
        id: "pending",
        title: "PENDING",
        status: TaskStatus::Pending,
    },
    SubSection {
        id: "in_progress",
        title: "IN PROGRESS",
        status: TaskStatus::InProgress,
    },
];

pub static COLUMNS: [Column; 4] = [
    Column {
        id: ColumnId::Todo,
        title: "TO DO",
        status: TaskStatus::Todo,
        sub_sections: &[],
    },
    Column {
        id: ColumnId::InProgress,
        title: "IN PROGRESS",
        status: TaskStatus::InProgress,
        sub_sections: &IN_PROGRESS_SECTIONS,
    },
    Column {
        id: ColumnId::InReview,
        title: "IN REVIEW",
        status: TaskStatus::InReview,
        sub_sections: &[],
    },
    Column {
        id: ColumnId::Done,
        title: "DONE",
        status: TaskStatus::Done,
        sub_sections: &[],
    },
];

impl Column {
    pub fn has_sub_sections(&self) -> bool {
        !self.sub_sections.is_empty()
    }

    /// Look up a column by its drop id.
    pub fn find(id: &str) -> Option<&'static Column> {
        COLUMNS.iter().find(|column| column.id.as_str() == id)
    }

    pub fn get(id: ColumnId) -> &'static Column {
        match id {
            ColumnId::Todo => &COLUMNS[0],
            ColumnId::InProgress => &COLUMNS[1],
            ColumnId::InReview => &COLUMNS[2],
            ColumnId::Done => &COLUMNS[3],
        }
    }

    /// The column a status is rendered in, if any.
    pub fn for_status(status: TaskStatus) -> Option<&'static Column> {
        COLUMNS.iter().find(|column| column.holds(status))
    }

    pub fn holds(&self, status: TaskStatus) -> bool {
        if self.has_sub_sections() {
            self.sub_sections.iter().any(|sub| sub.status == status)
        } else {
            self.status == status
        }
    }

    /// Title of the narrowest zone that shows `status`.
    pub fn zone_title(status: TaskStatus) -> Option<&'static str> {
        let column = Self::for_status(status)?;
        Some(
            column
                .sub_sections
                .iter()
                .find(|sub| sub.status == status)
                .map(|sub| sub.title)
                .unwrap_or(column.title),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_status_has_exactly_one_column() {
        for status in TaskStatus::ALL {
            let holders = COLUMNS.iter().filter(|c| c.holds(status)).count();
            assert_eq!(holders, 1, "status {} held by {} columns", status, holders);
        }
        assert!(Column::for_status(TaskStatus::Unknown).is_none());
    }

    #[test]
    fn test_in_progress_column_holds_both_sub_statuses() {
        let column = Column::get(ColumnId::InProgress);
        assert!(column.has_sub_sections());
        assert!(column.holds(TaskStatus::Pending));
        assert!(column.holds(TaskStatus::InProgress));
        assert_eq!(column.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_lookup_by_drop_id() {
        assert_eq!(Column::find("done").map(|c| c.id), Some(ColumnId::Done));
        assert!(Column::find("pending").is_none());
        assert_eq!(
            SubSection::find("pending").map(|s| s.status),
            Some(TaskStatus::Pending)
        );
        assert!(SubSection::find("todo").is_none());
    }

    #[test]
    fn test_zone_title() {
        assert_eq!(Column::zone_title(TaskStatus::Pending), Some("PENDING"));
        assert_eq!(Column::zone_title(TaskStatus::InReview), Some("IN REVIEW"));
        assert_eq!(Column::zone_title(TaskStatus::Unknown), None);
    }
}
