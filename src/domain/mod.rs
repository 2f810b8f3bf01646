pub mod drag;
pub mod due;
pub mod enums;
pub mod messages;
pub mod task;
pub mod views;

pub use drag::DragGesture;
pub use due::{format_due_local, parse_due_date};
pub use enums::{FilterMode, Locale, Theme, ToastKind, UiMode};
pub use task::{SubTask, Task, TaskId};
pub use views::{
    active_count, buddy_tier, filter_tasks, flatten_tasks, overdue_tasks, status_line,
    tree_connector, FlatRow,
};
