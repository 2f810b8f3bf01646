use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier shared by tasks and subtasks. Any string is accepted on load;
/// new ids are v4 UUIDs.
pub type TaskId = String;

fn new_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// A generated step under a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

impl SubTask {
    pub fn new(title: String) -> Self {
        Self {
            id: new_id(),
            title,
            completed: false,
        }
    }
}

/// A to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    /// Stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    /// Whether the subtask list is visible
    #[serde(default)]
    pub is_expanded: bool,
    /// A breakdown request for this task is in flight
    #[serde(default)]
    pub ai_loading: bool,
}

impl Task {
    pub fn new(title: String, due_date: Option<DateTime<Utc>>) -> Self {
        Self {
            id: new_id(),
            title,
            completed: false,
            created_at: Utc::now(),
            due_date,
            subtasks: Vec::new(),
            is_expanded: false,
            ai_loading: false,
        }
    }

    /// Overdue means a due date in the past on a task that is still open
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Count of completed subtasks and total subtasks
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|st| st.completed).count();
        (done, self.subtasks.len())
    }

    pub fn find_subtask_mut(&mut self, subtask_id: &str) -> Option<&mut SubTask> {
        self.subtasks.iter_mut().find(|st| st.id == subtask_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_task_new() {
        let task = Task::new("Buy milk".to_string(), None);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
        assert!(!task.is_expanded);
        assert!(!task.ai_loading);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("A".to_string(), None);
        let b = Task::new("A".to_string(), None);
        assert_ne!(a.id, b.id);
        assert_ne!(SubTask::new("x".to_string()).id, SubTask::new("x".to_string()).id);
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut task = Task::new("Pay rent".to_string(), Some(now - Duration::seconds(1)));
        assert!(task.is_overdue(now));

        task.completed = true;
        assert!(!task.is_overdue(now));

        task.completed = false;
        task.due_date = Some(now + Duration::hours(1));
        assert!(!task.is_overdue(now));

        task.due_date = None;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_due_date_equal_to_now_is_not_overdue() {
        let now = Utc::now();
        let task = Task::new("Edge".to_string(), Some(now));
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_subtask_progress() {
        let mut task = Task::new("Plan trip".to_string(), None);
        task.subtasks.push(SubTask::new("Book flights".to_string()));
        task.subtasks.push(SubTask::new("Book hotel".to_string()));
        task.subtasks[1].completed = true;
        assert_eq!(task.subtask_progress(), (1, 2));
    }

    #[test]
    fn test_serialized_field_names() {
        let mut task = Task::new("Stretch".to_string(), None);
        task.subtasks.push(SubTask::new("Warm up".to_string()));
        let value = serde_json::to_value(&task).unwrap();

        assert!(value.get("createdAt").unwrap().is_i64());
        assert!(value.get("isExpanded").is_some());
        assert!(value.get("aiLoading").is_some());
        assert!(value.get("dueDate").is_none());
        assert_eq!(value["subtasks"][0]["title"], "Warm up");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{
            "id": "7b1f6a0e-4c1e-4d7a-9a43-3f1f0c2a9e11",
            "title": "Legacy",
            "completed": true,
            "createdAt": 1700000000000
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.title, "Legacy");
        assert!(task.completed);
        assert!(task.subtasks.is_empty());
        assert!(task.due_date.is_none());
        assert_eq!(task.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_deserialize_accepts_non_uuid_ids() {
        let json = r#"{
            "id": "1700000000001",
            "title": "Old format",
            "completed": false,
            "createdAt": 1700000000001,
            "subtasks": [{ "id": "1700000000001-0", "title": "Step", "completed": false }]
        }"#;
        let mut task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "1700000000001");
        assert!(task.find_subtask_mut("1700000000001-0").is_some());
    }
}
