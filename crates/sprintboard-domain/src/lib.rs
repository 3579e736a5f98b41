pub mod autoscroll;
pub mod classify;
pub mod collision;
pub mod column;
pub mod drop_target;
pub mod filter;
pub mod store;
pub mod task;

pub use autoscroll::{AutoScroller, ScrollContainer, ScrollDelta};
pub use classify::{classify, BoardQuery, BoardView, ColumnBody, ColumnView, SubSectionView};
pub use collision::{detect_collisions, Collision, CollisionArgs, Droppable, Point, Rect};
pub use column::{Column, ColumnId, SubSection, COLUMNS};
pub use drop_target::DropTarget;
pub use filter::{CompositeFilter, PriorityFilter, SearchFilter, TaskFilter};
pub use store::{BoardStore, Snapshot};
pub use task::{DueState, Task, TaskId, TaskPriority, TaskStatus, UserSummary};
