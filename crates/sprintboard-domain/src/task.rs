use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the remote task service.
///
/// Drag gestures identify tasks by the string form, so `Display` and
/// `FromStr` must round-trip: only the canonical decimal form parses
/// (no sign, padding or surrounding whitespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .ok()
            .map(TaskId)
            .filter(|id| id.to_string() == s)
            .ok_or_else(|| format!("invalid task id: {:?}", s))
    }
}

impl Serialize for TaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(TaskId(n)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    Pending,
    InProgress,
    InReview,
    Done,
    /// Any status string the board does not know how to place.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::InReview => "in_review",
            TaskStatus::Done => "done",
            TaskStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TaskStatus::Unknown)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown priority: {}", s))
    }
}

/// Reads any JSON value; null or anything that does not decode as `T`
/// becomes `None`.
fn lenient<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(serde_json::from_value::<Option<T>>(value).ok().flatten())
}

/// Missing, null, non-string or unrecognised priorities all read as medium.
fn deserialize_priority<'de, D: Deserializer<'de>>(d: D) -> Result<TaskPriority, D::Error> {
    let raw: Option<String> = lenient(d)?;
    Ok(raw
        .as_deref()
        .and_then(TaskPriority::parse)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserSummary {
    fn preferred_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.username.as_deref().filter(|n| !n.is_empty()))
    }

    pub fn display_name(&self) -> &str {
        self.preferred_name().unwrap_or("Assigned")
    }

    pub fn initial(&self) -> char {
        self.preferred_name()
            .and_then(|n| n.chars().next())
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('U')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueState {
    Overdue,
    DueSoon,
    Upcoming,
}

/// Task as the remote service sends it. Only `id` is strict; every other
/// field falls back to its default when missing, null or malformed.
#[derive(Serialize, Deserialize)]
struct TaskRecord {
    id: TaskId,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_priority")]
    priority: TaskPriority,
    #[serde(default, deserialize_with = "lenient")]
    assigned_to: Option<UserSummary>,
    #[serde(default, deserialize_with = "lenient")]
    due_date: Option<NaiveDate>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let status = record
            .status
            .as_deref()
            .and_then(TaskStatus::parse)
            .unwrap_or(TaskStatus::Unknown);
        let unrecognised_status = match status {
            TaskStatus::Unknown => record.status,
            _ => None,
        };
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            description: record.description,
            status,
            unrecognised_status,
            priority: record.priority,
            assigned_to: record.assigned_to,
            due_date: record.due_date,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            status: Some(task.status_name().to_string()),
            id: task.id,
            title: Some(task.title),
            description: task.description,
            priority: task.priority,
            assigned_to: task.assigned_to,
            due_date: task.due_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// The remote's own status string when `status` is `Unknown`
    unrecognised_status: Option<String>,
    pub priority: TaskPriority,
    pub assigned_to: Option<UserSummary>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    const DUE_SOON_DAYS: i64 = 3;

    pub fn new(id: TaskId, title: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status,
            unrecognised_status: None,
            priority: TaskPriority::Medium,
            assigned_to: None,
            due_date: None,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Copy of this task carrying a different status.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Status as the remote spelled it; unrecognised strings are kept
    /// verbatim.
    pub fn status_name(&self) -> &str {
        match self.status {
            TaskStatus::Unknown => self.unrecognised_status.as_deref().unwrap_or("unknown"),
            status => status.as_str(),
        }
    }

    /// The identifier a drag gesture uses for this task.
    pub fn drag_id(&self) -> String {
        self.id.to_string()
    }

    /// Short key shown on the card, e.g. `SPRINT-42`.
    pub fn key(&self) -> String {
        format!("SPRINT-{}", self.id)
    }

    pub fn assignee_name(&self) -> &str {
        self.assigned_to
            .as_ref()
            .map(UserSummary::display_name)
            .unwrap_or("Unassigned")
    }

    pub fn due_state(&self, today: NaiveDate) -> Option<DueState> {
        let due = self.due_date?;
        if due < today {
            return Some(DueState::Overdue);
        }
        if (due - today).num_days() <= Self::DUE_SOON_DAYS {
            Some(DueState::DueSoon)
        } else {
            Some(DueState::Upcoming)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_id_accepts_number_or_string() {
        let from_num: TaskId = serde_json::from_value(json!(7)).unwrap();
        let from_str: TaskId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(from_num, from_str);
        assert_eq!("7".parse::<TaskId>().unwrap().to_string(), "7");
        for odd in [" 7", "+7", "07", "7 ", ""] {
            assert!(odd.parse::<TaskId>().is_err(), "{:?} parsed", odd);
        }
        assert!(serde_json::from_value::<TaskId>(json!("abc")).is_err());
    }

    #[test]
    fn test_priority_defaults_to_medium() {
        let missing: Task = serde_json::from_value(json!({"id": 1, "title": "a"})).unwrap();
        let null: Task =
            serde_json::from_value(json!({"id": 2, "title": "b", "priority": null})).unwrap();
        let odd: Task =
            serde_json::from_value(json!({"id": 3, "title": "c", "priority": "urgent"})).unwrap();
        assert_eq!(missing.priority, TaskPriority::Medium);
        assert_eq!(null.priority, TaskPriority::Medium);
        assert_eq!(odd.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_unrecognised_status_is_unknown() {
        let task: Task =
            serde_json::from_value(json!({"id": 1, "title": "a", "status": "blocked"})).unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);
        assert!(!task.status.is_known());
        assert_eq!(task.status_name(), "blocked");
        assert_eq!(serde_json::to_value(&task).unwrap()["status"], "blocked");

        let moved = task.with_status(TaskStatus::Done);
        assert_eq!(moved.status_name(), "done");
        assert_eq!(moved.with_status(TaskStatus::Unknown).status_name(), "blocked");

        let task: Task =
            serde_json::from_value(json!({"id": 1, "title": "a", "status": "in_review"})).unwrap();
        assert_eq!(task.status, TaskStatus::InReview);
    }

    #[test]
    fn test_remote_payload_decodes() {
        let task: Task = serde_json::from_value(json!({
            "id": 12,
            "sprint": 3,
            "title": "Fix login",
            "description": null,
            "status": "pending",
            "priority": "high",
            "assigned_to": {"id": 4, "username": "asha", "email": "a@x.io", "name": ""},
            "due_date": "2026-10-21",
            "created_at": "2026-10-01T10:00:00Z",
            "updated_at": "2026-10-02T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(task.key(), "SPRINT-12");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.assignee_name(), "asha");
        assert_eq!(task.assigned_to.as_ref().unwrap().initial(), 'A');
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 10, 21));
    }

    #[test]
    fn test_malformed_fields_fall_back() {
        let task: Task = serde_json::from_value(json!({
            "id": "5",
            "title": null,
            "status": 3,
            "priority": 2,
            "assigned_to": {"name": "no id"},
            "due_date": ""
        }))
        .unwrap();

        assert_eq!(task.id, TaskId(5));
        assert_eq!(task.title, "");
        assert_eq!(task.status, TaskStatus::Unknown);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.assigned_to.is_none());
        assert!(task.due_date.is_none());

        assert!(serde_json::from_value::<Task>(json!({"id": "x1", "title": "a"})).is_err());
    }

    #[test]
    fn test_assignee_fallbacks() {
        let task = Task::new(TaskId(1), "t", TaskStatus::Todo);
        assert_eq!(task.assignee_name(), "Unassigned");

        let nameless = UserSummary {
            id: 9,
            name: None,
            username: None,
        };
        assert_eq!(nameless.display_name(), "Assigned");
        assert_eq!(nameless.initial(), 'U');
    }

    #[test]
    fn test_due_state() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let mut task = Task::new(TaskId(1), "t", TaskStatus::Todo);
        assert_eq!(task.due_state(today), None);

        task.due_date = NaiveDate::from_ymd_opt(2026, 10, 18);
        assert_eq!(task.due_state(today), Some(DueState::Overdue));

        task.due_date = NaiveDate::from_ymd_opt(2026, 10, 19);
        assert_eq!(task.due_state(today), Some(DueState::DueSoon));

        task.due_date = NaiveDate::from_ymd_opt(2026, 10, 22);
        assert_eq!(task.due_state(today), Some(DueState::DueSoon));

        task.due_date = NaiveDate::from_ymd_opt(2026, 10, 23);
        assert_eq!(task.due_state(today), Some(DueState::Upcoming));
    }
}
