use serde_json::json;
use sprintboard_domain::*;
use std::collections::HashSet;

fn sample() -> serde_json::Value {
    json!([
        {"id": 1, "title": "Fix bug", "status": "todo", "priority": "high"},
        {"id": 2, "title": "Write docs", "status": "pending", "priority": "low"},
        {"id": 3, "title": "Ship release", "status": "in_progress"},
        {"id": 4, "title": "Review PR", "status": "in_review", "description": "bug fix review"},
        {"id": 5, "title": "Retro", "status": "done"},
        {"id": 6, "title": "Legacy", "status": "archived"},
        {"id": null, "title": "Ghost", "status": "todo"}
    ])
}

#[test]
fn test_classification_is_complete_and_disjoint() {
    let mut store = BoardStore::new();
    let snapshot = store.replace(&sample());
    let view = classify(&snapshot, &BoardQuery::default());

    let mut seen = HashSet::new();
    for column in &view.columns {
        for task in column.tasks() {
            assert!(seen.insert(task.id), "task {} listed twice", task.id);
        }
    }

    let expected: HashSet<TaskId> = snapshot
        .iter()
        .filter(|task| task.status.is_known())
        .map(|task| task.id)
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_missing_id_reduces_visible_count_by_one() {
    let raw = json!([
        {"id": 1, "title": "a", "status": "todo"},
        {"id": 2, "title": "b", "status": "done"},
        {"id": null, "title": "c", "status": "done"},
        {"id": 3, "title": "d", "status": "in_review"}
    ]);
    let mut store = BoardStore::new();
    let snapshot = store.replace(&raw);
    let view = classify(&snapshot, &BoardQuery::default());

    assert_eq!(view.visible_count(), raw.as_array().unwrap().len() - 1);
    assert_eq!(store.dropped_on_last_replace(), 1);
}

#[test]
fn test_search_and_priority_filters() {
    let raw = json!([
        {"id": 1, "title": "Fix bug", "status": "todo", "priority": "high"},
        {"id": 2, "title": "Write docs", "status": "todo", "priority": "low"}
    ]);
    let mut store = BoardStore::new();
    let snapshot = store.replace(&raw);

    let by_search = classify(&snapshot, &BoardQuery::new("bug", None));
    let ids: Vec<TaskId> = by_search.zone(TaskStatus::Todo).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TaskId(1)]);

    let by_priority = classify(&snapshot, &BoardQuery::new("", Some(TaskPriority::Low)));
    let ids: Vec<TaskId> = by_priority.zone(TaskStatus::Todo).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TaskId(2)]);
}

#[test]
fn test_drop_on_in_progress_sub_section_repartitions() {
    let mut store = BoardStore::from_tasks(vec![
        Task::new(TaskId(1), "a", TaskStatus::Pending),
        Task::new(TaskId(2), "b", TaskStatus::InProgress),
        Task::new(TaskId(3), "c", TaskStatus::InProgress),
        Task::new(TaskId(4), "d", TaskStatus::Pending),
    ]);

    let target = DropTarget::resolve("in_progress", &store.snapshot());
    let status = target.target_status().unwrap();
    let snapshot = store.patch_status(TaskId(4), status);

    let view = classify(&snapshot, &BoardQuery::default());
    assert_eq!(view.zone(TaskStatus::InProgress).len(), 3);
    assert_eq!(view.zone(TaskStatus::Pending).len(), 1);
    assert!(view
        .zone(TaskStatus::InProgress)
        .iter()
        .any(|t| t.id == TaskId(4)));
}

#[test]
fn test_sub_sectioned_column_drop_defaults_to_in_progress() {
    let tasks = vec![Task::new(TaskId(1), "a", TaskStatus::Todo)];
    let column = Column::get(ColumnId::InProgress);
    let target = DropTarget::Column(column);
    assert_eq!(target.target_status(), Some(TaskStatus::InProgress));
    // the same id resolves to the sub-section first, with the same outcome
    assert_eq!(
        DropTarget::resolve("in_progress", &tasks).target_status(),
        Some(TaskStatus::InProgress)
    );
}

#[test]
fn test_only_entries_without_usable_id_are_dropped() {
    let raw = json!([
        {"id": 1, "title": "ok", "status": "todo"},
        {"id": 2, "title": null, "status": "todo"},
        {"id": 3, "title": "c", "status": "done", "due_date": ""},
        {"id": 4, "title": "d", "status": "in_review", "priority": 2},
        {"id": 5, "title": "e", "status": "pending", "assigned_to": {"name": "Ada"}},
        {"id": null, "title": "ghost", "status": "todo"},
        {"id": "abc", "title": "junk", "status": "todo"}
    ]);
    let mut store = BoardStore::new();
    let snapshot = store.replace(&raw);
    let view = classify(&snapshot, &BoardQuery::default());

    assert_eq!(view.visible_count(), 5);
    assert_eq!(store.dropped_on_last_replace(), 2);
    assert_eq!(snapshot.get(TaskId(2)).unwrap().title, "");
    assert_eq!(
        snapshot.get(TaskId(4)).unwrap().priority,
        TaskPriority::Medium
    );
}
