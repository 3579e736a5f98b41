//! Task filtering functionality.
//!
//! Provides the predicates the board applies before grouping tasks into
//! columns.

pub mod task_filter;

pub use task_filter::{CompositeFilter, PriorityFilter, SearchFilter, TaskFilter};
