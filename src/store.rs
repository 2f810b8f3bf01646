use crate::domain::{Locale, SubTask, Task, TaskId, ToastKind};
use chrono::{DateTime, Utc};

/// Feedback produced by a task event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    /// A task was completed
    Celebrate,
    /// A task was unchecked or an unfinished task was deleted
    Roast,
}

impl Feedback {
    pub fn toast_kind(&self) -> ToastKind {
        match self {
            Self::Celebrate => ToastKind::Success,
            Self::Roast => ToastKind::Roast,
        }
    }
}

/// Work handed to the breakdown collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRequest {
    pub task_id: TaskId,
    pub title: String,
    pub locale: Locale,
}

/// How a breakdown request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakdownOutcome {
    /// The collaborator returned these subtask titles (possibly none)
    Produced(Vec<String>),
    /// The request failed; nothing is shown to the user
    Failed,
}

/// The task list and the only operations allowed to change it.
///
/// Every committed mutation bumps [`TaskStore::revision`], which is what the
/// persistence and overdue observers watch. Feedback produced by an operation
/// is queued and drained by the caller with [`TaskStore::take_feedback`].
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    revision: u64,
    feedback: Vec<Feedback>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            revision: 0,
            feedback: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Monotonic counter bumped on every committed change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    fn commit(&mut self) {
        self.revision += 1;
    }

    /// Drain feedback queued by previous operations
    pub fn take_feedback(&mut self) -> Vec<Feedback> {
        std::mem::take(&mut self.feedback)
    }

    /// Create a task at the head of the list. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str, due_date: Option<DateTime<Utc>>) -> Option<TaskId> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let task = Task::new(title.to_string(), due_date);
        let id = task.id.clone();
        tracing::debug!(task_id = %id, "task added");
        self.tasks.insert(0, task);
        self.commit();
        Some(id)
    }

    /// Flip completion, celebrating or roasting the user accordingly
    pub fn toggle_task(&mut self, id: &str) {
        let Some(task) = self.find_mut(id) else {
            return;
        };

        task.completed = !task.completed;
        let feedback = if task.completed {
            Feedback::Celebrate
        } else {
            Feedback::Roast
        };
        tracing::debug!(task_id = %id, completed = task.completed, "task toggled");
        self.feedback.push(feedback);
        self.commit();
    }

    /// Remove a task. Deleting an unfinished task earns a roast.
    pub fn delete_task(&mut self, id: &str) {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return;
        };

        let removed = self.tasks.remove(pos);
        if !removed.completed {
            self.feedback.push(Feedback::Roast);
        }
        tracing::debug!(task_id = %id, "task deleted");
        self.commit();
    }

    pub fn toggle_expand(&mut self, id: &str) {
        if let Some(task) = self.find_mut(id) {
            task.is_expanded = !task.is_expanded;
            self.commit();
        }
    }

    /// Flip a subtask. The parent's completion is left alone.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) {
        let Some(subtask) = self
            .find_mut(task_id)
            .and_then(|task| task.find_subtask_mut(subtask_id))
        else {
            return;
        };

        subtask.completed = !subtask.completed;
        self.commit();
    }

    /// Mark a breakdown as in flight and describe the request to send.
    ///
    /// Returns `None` for unknown tasks and for tasks that already have a
    /// request outstanding.
    pub fn begin_breakdown(&mut self, id: &str, locale: Locale) -> Option<BreakdownRequest> {
        let task = self.find_mut(id)?;
        if task.ai_loading {
            return None;
        }

        task.ai_loading = true;
        let request = BreakdownRequest {
            task_id: id.to_string(),
            title: task.title.clone(),
            locale,
        };
        self.commit();
        Some(request)
    }

    /// Apply the result of a breakdown. The loading flag is cleared either way.
    pub fn finish_breakdown(&mut self, id: &str, outcome: BreakdownOutcome) {
        let Some(task) = self.find_mut(id) else {
            // Deleted while the request was running
            return;
        };

        task.ai_loading = false;
        match outcome {
            BreakdownOutcome::Produced(titles) => {
                let before = task.subtasks.len();
                task.subtasks.extend(
                    titles
                        .into_iter()
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .map(SubTask::new),
                );
                task.is_expanded = true;
                tracing::debug!(
                    task_id = %id,
                    added = task.subtasks.len() - before,
                    "breakdown applied"
                );
            }
            BreakdownOutcome::Failed => {
                tracing::debug!(task_id = %id, "breakdown failed, subtasks unchanged");
            }
        }
        self.commit();
    }

    /// Move the task at `from` to `to`, shifting the tasks in between
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.tasks.len() || to >= self.tasks.len() {
            return;
        }

        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.commit();
    }

    /// Clear in-flight flags left over from a previous run
    pub fn coerce_loading_to_idle(&mut self) {
        let mut changed = false;
        for task in &mut self.tasks {
            if task.ai_loading {
                task.ai_loading = false;
                changed = true;
            }
        }
        if changed {
            self.commit();
        }
    }
}
