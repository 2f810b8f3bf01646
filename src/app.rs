use crate::breakdown::BreakdownFinished;
use crate::domain::{
    flatten_tasks, overdue_tasks, parse_due_date, DragGesture, FilterMode, FlatRow, Locale, Theme,
    UiMode,
};
use crate::feedback::FeedbackState;
use crate::notifications;
use crate::overdue::OverdueNotifier;
use crate::persistence::Persister;
use crate::store::{BreakdownRequest, TaskStore};
use crate::ticker;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Instant;

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub title: String,
    pub due: String,
    pub editing_field: usize, // 0 = title, 1 = due
    /// Why the last submit was rejected
    pub error: Option<String>,
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub filter: FilterMode,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Highlighted entry in the locale or theme popup
    pub selector_index: usize,
    pub locale: Locale,
    pub theme: Theme,
    pub drag: DragGesture,
    pub feedback: FeedbackState,
    overdue: OverdueNotifier,
    persister: Persister,
    /// Breakdown requests waiting to be handed to the dispatcher
    outbox: Vec<BreakdownRequest>,
}

impl AppState {
    /// Load saved state and build the app around it
    pub fn new(mut persister: Persister) -> Self {
        let saved = persister.load();
        let mut store = TaskStore::new(saved.tasks);
        store.coerce_loading_to_idle();

        Self {
            store,
            filter: FilterMode::All,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            selector_index: 0,
            locale: saved.locale,
            theme: saved.theme,
            drag: DragGesture::default(),
            feedback: FeedbackState::new(ticker::feedback_duration()),
            overdue: OverdueNotifier::new(ticker::overdue_interval()),
            persister,
            outbox: Vec::new(),
        }
    }

    /// Rows currently on screen: filtered tasks plus expanded subtasks
    pub fn rows(&self) -> Vec<FlatRow> {
        flatten_tasks(self.store.tasks(), self.filter)
    }

    /// Get the currently selected item (returns task_index and optional subtask_index)
    pub fn get_selected_item(&self) -> Option<(usize, Option<usize>)> {
        self.rows()
            .get(self.selected_index)
            .map(|row| (row.task_index, row.subtask_index))
    }

    fn row_of_task(&self, task_index: usize) -> Option<usize> {
        self.rows()
            .iter()
            .position(|row| row.task_index == task_index && row.subtask_index.is_none())
    }

    /// Keep the selection on an existing row after the list shrinks
    fn clamp_selection(&mut self) {
        let len = self.rows().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows().len() {
            self.selected_index += 1;
        }
    }

    /// Toggle completion of the selected task or subtask
    pub fn toggle_selected(&mut self) {
        let Some((task_idx, subtask_idx)) = self.get_selected_item() else {
            return;
        };
        let task = &self.store.tasks()[task_idx];
        let task_id = task.id.clone();

        match subtask_idx {
            Some(st_idx) => {
                let subtask_id = task.subtasks[st_idx].id.clone();
                self.store.toggle_subtask(&task_id, &subtask_id);
            }
            None => self.store.toggle_task(&task_id),
        }
        self.clamp_selection();
    }

    /// Delete the selected task. Subtask rows are left alone.
    pub fn delete_selected(&mut self) {
        if let Some((task_idx, None)) = self.get_selected_item() {
            let id = self.store.tasks()[task_idx].id.clone();
            self.store.delete_task(&id);
            self.clamp_selection();
        }
    }

    /// Toggle collapse/expand for the selected task (or the parent of a selected subtask)
    pub fn toggle_expand(&mut self) {
        let Some((task_idx, subtask_idx)) = self.get_selected_item() else {
            return;
        };
        let id = self.store.tasks()[task_idx].id.clone();
        self.store.toggle_expand(&id);

        if subtask_idx.is_some() {
            if let Some(row) = self.row_of_task(task_idx) {
                self.selected_index = row;
            }
        }
        self.clamp_selection();
    }

    /// Ask for a breakdown of the selected task.
    ///
    /// Offered only for open tasks that have no subtasks yet.
    pub fn request_breakdown(&mut self) {
        let Some((task_idx, None)) = self.get_selected_item() else {
            return;
        };
        let task = &self.store.tasks()[task_idx];
        if task.completed || !task.subtasks.is_empty() {
            return;
        }

        let id = task.id.clone();
        if let Some(request) = self.store.begin_breakdown(&id, self.locale) {
            self.outbox.push(request);
        }
    }

    /// Hand queued breakdown requests to whoever runs them
    pub fn take_breakdown_requests(&mut self) -> Vec<BreakdownRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn apply_breakdown(&mut self, finished: BreakdownFinished) {
        self.store.finish_breakdown(&finished.task_id, finished.outcome);
        self.clamp_selection();
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        self.end_drag();
        self.filter = filter;
        self.selected_index = 0;
    }

    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    /// Grab the selected task for reordering. Only possible in the unfiltered view.
    pub fn start_drag(&mut self) {
        if self.filter != FilterMode::All {
            return;
        }
        if let Some((task_idx, None)) = self.get_selected_item() {
            self.drag.start(task_idx);
            self.ui_mode = UiMode::Dragging;
        }
    }

    /// Move the grabbed task one slot up or down
    pub fn drag_step(&mut self, down: bool) {
        let Some(current) = self.drag.current() else {
            return;
        };
        let target = if down {
            current + 1
        } else if current > 0 {
            current - 1
        } else {
            return;
        };
        if target >= self.store.len() {
            return;
        }

        self.drag.enter(target, &mut self.store);
        if let Some(row) = self.row_of_task(target) {
            self.selected_index = row;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
        if self.ui_mode == UiMode::Dragging {
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Toggle between editing fields in input form (title -> due)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                _ => form.due.push(c),
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.pop(),
                _ => form.due.pop(),
            };
        }
    }

    /// Submit the form. Invalid input keeps the form open with an error.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.as_mut() else {
            return;
        };

        if form.title.trim().is_empty() {
            form.error = Some("Give your task a title".to_string());
            form.editing_field = 0;
            return;
        }

        let due = match parse_due_date(&form.due) {
            Ok(due) => due,
            Err(e) => {
                form.error = Some(e.to_string());
                form.editing_field = 1;
                return;
            }
        };

        let title = form.title.clone();
        self.input_form = None;
        self.ui_mode = UiMode::Normal;

        if self.store.add_task(&title, due).is_some() {
            // New tasks land at the head of the list
            self.selected_index = 0;
        }
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    pub fn open_locale_selector(&mut self) {
        self.selector_index = Locale::all()
            .iter()
            .position(|l| *l == self.locale)
            .unwrap_or(0);
        self.ui_mode = UiMode::LocaleSelector;
    }

    pub fn open_theme_selector(&mut self) {
        self.selector_index = Theme::all()
            .iter()
            .position(|t| *t == self.theme)
            .unwrap_or(0);
        self.ui_mode = UiMode::ThemeSelector;
    }

    fn selector_len(&self) -> usize {
        match self.ui_mode {
            UiMode::LocaleSelector => Locale::all().len(),
            UiMode::ThemeSelector => Theme::all().len(),
            _ => 0,
        }
    }

    pub fn selector_up(&mut self) {
        self.selector_index = self.selector_index.saturating_sub(1);
    }

    pub fn selector_down(&mut self) {
        if self.selector_index + 1 < self.selector_len() {
            self.selector_index += 1;
        }
    }

    /// Apply the highlighted locale or theme and close the popup
    pub fn selector_confirm(&mut self) {
        match self.ui_mode {
            UiMode::LocaleSelector => {
                if let Some(locale) = Locale::all().get(self.selector_index) {
                    tracing::info!(locale = locale.code(), "locale changed");
                    self.locale = *locale;
                }
            }
            UiMode::ThemeSelector => {
                if let Some(theme) = Theme::all().get(self.selector_index) {
                    tracing::info!(theme = theme.id(), "theme changed");
                    self.theme = *theme;
                }
            }
            _ => {}
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn selector_cancel(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Run the observers: feedback, overdue checks, expiry, and saving
    pub fn tick(&mut self, now: Instant, wall_clock: DateTime<Utc>) {
        for event in self.store.take_feedback() {
            self.feedback.apply(event, now);
        }

        let revision = self.store.revision();
        if self
            .overdue
            .poll(self.store.tasks(), revision, wall_clock, now)
        {
            self.feedback.overdue(now);
            notifications::notify_overdue(overdue_tasks(self.store.tasks(), wall_clock).len());
        }

        self.feedback.expire(now);

        if let Err(e) = self.save() {
            tracing::error!(error = %e, "failed to save state");
        }
    }

    /// Write tasks, locale, and theme if anything changed since the last save
    pub fn save(&mut self) -> Result<()> {
        self.persister.sync(
            self.store.tasks(),
            self.store.revision(),
            self.locale,
            self.theme,
        )?;
        Ok(())
    }
}
