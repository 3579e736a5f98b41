use crate::cli::BoardArgs;
use crate::context::CliContext;
use crate::output;
use chrono::NaiveDate;
use serde::Serialize;
use sprintboard_domain::{
    classify, BoardQuery, ColumnBody, ColumnView, DueState, SubSectionView, Task,
};

#[derive(Serialize)]
struct TaskCard<'a> {
    id: u64,
    key: String,
    title: &'a str,
    status: &'a str,
    priority: &'static str,
    assignee: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due: Option<DueState>,
}

impl<'a> TaskCard<'a> {
    fn new(task: &'a Task, today: NaiveDate) -> Self {
        Self {
            id: task.id.0,
            key: task.key(),
            title: &task.title,
            status: task.status_name(),
            priority: task.priority.label(),
            assignee: task.assignee_name(),
            due_date: task.due_date,
            due: task.due_state(today),
        }
    }
}

#[derive(Serialize)]
struct SubSectionOutput<'a> {
    id: &'static str,
    title: &'static str,
    count: usize,
    tasks: Vec<TaskCard<'a>>,
}

#[derive(Serialize)]
struct ColumnOutput<'a> {
    id: &'static str,
    title: &'static str,
    count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tasks: Vec<TaskCard<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_sections: Vec<SubSectionOutput<'a>>,
}

#[derive(Serialize)]
struct BoardOutput<'a> {
    sprint: u64,
    visible: usize,
    dropped: usize,
    columns: Vec<ColumnOutput<'a>>,
}

fn cards<'a>(tasks: &[&'a Task], today: NaiveDate) -> Vec<TaskCard<'a>> {
    tasks.iter().map(|task| TaskCard::new(task, today)).collect()
}

fn sub_section_output<'a>(view: &SubSectionView<'a>, today: NaiveDate) -> SubSectionOutput<'a> {
    SubSectionOutput {
        id: view.sub_section.id,
        title: view.sub_section.title,
        count: view.tasks.len(),
        tasks: cards(&view.tasks, today),
    }
}

fn column_output<'a>(view: &ColumnView<'a>, today: NaiveDate) -> ColumnOutput<'a> {
    let (tasks, sub_sections) = match &view.body {
        ColumnBody::Flat(tasks) => (cards(tasks, today), Vec::new()),
        ColumnBody::Sectioned(sections) => (
            Vec::new(),
            sections
                .iter()
                .map(|section| sub_section_output(section, today))
                .collect(),
        ),
    };
    ColumnOutput {
        id: view.column.id.as_str(),
        title: view.column.title,
        count: view.len(),
        tasks,
        sub_sections,
    }
}

pub async fn handle(ctx: &CliContext, args: BoardArgs) -> anyhow::Result<()> {
    let snapshot = ctx.load_sprint(args.sprint).await?;
    let query = BoardQuery::new(args.search, args.priority);
    let view = classify(&snapshot, &query);
    let today = chrono::Local::now().date_naive();

    output::output_success(BoardOutput {
        sprint: args.sprint,
        visible: view.visible_count(),
        dropped: ctx.coordinator.dropped_on_last_replace(),
        columns: view
            .columns
            .iter()
            .map(|column| column_output(column, today))
            .collect(),
    });
    Ok(())
}
