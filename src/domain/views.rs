use super::enums::FilterMode;
use super::task::Task;
use chrono::{DateTime, Utc};

/// A flattened row for rendering the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Index into the full task list
    pub task_index: usize,
    /// Subtask index (None for task rows)
    pub subtask_index: Option<usize>,
    /// Whether this is the last subtask of its parent
    pub is_last: bool,
}

/// Apply a filter mode, keeping the source order
pub fn filter_tasks(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks.iter().filter(|t| mode.matches(t.completed)).collect()
}

/// Indices into `tasks` of the entries that pass the filter
pub fn filtered_indices(tasks: &[Task], mode: FilterMode) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| mode.matches(t.completed))
        .map(|(i, _)| i)
        .collect()
}

/// Number of tasks not yet completed
pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

/// Tasks that are overdue at `now`
pub fn overdue_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_overdue(now)).collect()
}

/// Motivational tier keyed by how many tasks are still open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuddyTier {
    /// Nothing open
    Zero,
    /// Fewer than 3 open
    UnderThree,
    /// Fewer than 6 open
    UnderSix,
    /// Fewer than 10 open
    UnderTen,
    /// 10 or more
    Max,
}

/// Pick the smallest threshold the count stays under, else the max tier
pub fn buddy_tier(active: usize) -> BuddyTier {
    const THRESHOLDS: [(usize, BuddyTier); 3] = [
        (3, BuddyTier::UnderThree),
        (6, BuddyTier::UnderSix),
        (10, BuddyTier::UnderTen),
    ];

    if active == 0 {
        return BuddyTier::Zero;
    }
    THRESHOLDS
        .iter()
        .find(|(limit, _)| active < *limit)
        .map(|(_, tier)| *tier)
        .unwrap_or(BuddyTier::Max)
}

/// Flatten the visible tasks (and expanded subtasks) into rows
pub fn flatten_tasks(tasks: &[Task], mode: FilterMode) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for task_index in filtered_indices(tasks, mode) {
        let task = &tasks[task_index];
        rows.push(FlatRow {
            task_index,
            subtask_index: None,
            is_last: false,
        });

        if task.is_expanded && !task.subtasks.is_empty() {
            let subtask_count = task.subtasks.len();
            for st_idx in 0..subtask_count {
                rows.push(FlatRow {
                    task_index,
                    subtask_index: Some(st_idx),
                    is_last: st_idx == subtask_count - 1,
                });
            }
        }
    }

    rows
}

/// Summary line: celebration when everything is done, else a remaining count
pub fn status_line(tasks: &[Task]) -> String {
    let active = active_count(tasks);
    if active == 0 && !tasks.is_empty() {
        "All done! You're a legend! 🎉".to_string()
    } else {
        format!("{} task(s) remaining", active)
    }
}

/// Get tree connector for subtasks
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}
