//! Grouping of a task snapshot into the board's columns.
//!
//! `classify` is pure: it never touches the network or the store, and the
//! same inputs always produce the same view. Tasks keep their snapshot order
//! inside every column and sub-section.

use serde::Serialize;

use crate::column::{Column, ColumnId, SubSection, COLUMNS};
use crate::filter::{CompositeFilter, PriorityFilter, SearchFilter, TaskFilter};
use crate::task::{Task, TaskPriority, TaskStatus};

/// Search and priority predicates applied before grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardQuery {
    pub search: String,
    pub priority: Option<TaskPriority>,
}

impl BoardQuery {
    pub fn new(search: impl Into<String>, priority: Option<TaskPriority>) -> Self {
        Self {
            search: search.into(),
            priority,
        }
    }

    pub fn to_filter(&self) -> CompositeFilter {
        let mut filter = CompositeFilter::new();
        if !self.search.is_empty() {
            filter = filter.with_filter(Box::new(SearchFilter::new(self.search.as_str())));
        }
        if let Some(priority) = self.priority {
            filter = filter.with_filter(Box::new(PriorityFilter::new(priority)));
        }
        filter
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubSectionView<'a> {
    pub sub_section: &'static SubSection,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnBody<'a> {
    Flat(Vec<&'a Task>),
    Sectioned(Vec<SubSectionView<'a>>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView<'a> {
    pub column: &'static Column,
    pub body: ColumnBody<'a>,
}

impl<'a> ColumnView<'a> {
    fn empty(column: &'static Column) -> Self {
        let body = if column.has_sub_sections() {
            ColumnBody::Sectioned(
                column
                    .sub_sections
                    .iter()
                    .map(|sub_section| SubSectionView {
                        sub_section,
                        tasks: Vec::new(),
                    })
                    .collect(),
            )
        } else {
            ColumnBody::Flat(Vec::new())
        };
        Self { column, body }
    }

    fn push(&mut self, task: &'a Task) {
        match &mut self.body {
            ColumnBody::Flat(tasks) => tasks.push(task),
            ColumnBody::Sectioned(sections) => {
                if let Some(section) = sections
                    .iter_mut()
                    .find(|s| s.sub_section.status == task.status)
                {
                    section.tasks.push(task);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        match &self.body {
            ColumnBody::Flat(tasks) => tasks.len(),
            ColumnBody::Sectioned(sections) => sections.iter().map(|s| s.tasks.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every task in the column, sub-section by sub-section.
    pub fn tasks(&self) -> Vec<&'a Task> {
        match &self.body {
            ColumnBody::Flat(tasks) => tasks.clone(),
            ColumnBody::Sectioned(sections) => sections
                .iter()
                .flat_map(|s| s.tasks.iter().copied())
                .collect(),
        }
    }

    pub fn sub_section(&self, status: TaskStatus) -> Option<&SubSectionView<'a>> {
        match &self.body {
            ColumnBody::Flat(_) => None,
            ColumnBody::Sectioned(sections) => {
                sections.iter().find(|s| s.sub_section.status == status)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardView<'a> {
    pub columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    pub fn column(&self, id: ColumnId) -> Option<&ColumnView<'a>> {
        self.columns.iter().find(|view| view.column.id == id)
    }

    /// Tasks shown in the zone that holds `status`, whether that zone is a
    /// whole column or a sub-section.
    pub fn zone(&self, status: TaskStatus) -> Vec<&'a Task> {
        let Some(column) = Column::for_status(status) else {
            return Vec::new();
        };
        let Some(view) = self.column(column.id) else {
            return Vec::new();
        };
        match view.sub_section(status) {
            Some(section) => section.tasks.clone(),
            None => view.tasks(),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(ColumnView::len).sum()
    }
}

/// Group `tasks` into columns after applying `query`.
pub fn classify<'a>(tasks: &'a [Task], query: &BoardQuery) -> BoardView<'a> {
    let filter = query.to_filter();
    let mut columns: Vec<ColumnView<'a>> = COLUMNS.iter().map(ColumnView::empty).collect();

    for task in tasks.iter().filter(|task| filter.matches(task)) {
        if let Some(view) = columns.iter_mut().find(|view| view.column.holds(task.status)) {
            view.push(task);
        }
    }

    BoardView { columns }
}
