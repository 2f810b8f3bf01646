use super::storage::KeyValueStore;
use crate::domain::{Locale, Task, Theme};
use anyhow::{Context, Result};

pub const TASKS_KEY: &str = "lets-get-it-buddy-tasks";
pub const LOCALE_KEY: &str = "lets-get-it-buddy-lang";
pub const THEME_KEY: &str = "lets-get-it-buddy-theme";

/// Everything restored at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub tasks: Vec<Task>,
    pub locale: Locale,
    pub theme: Theme,
}

/// Parse the stored task list.
///
/// Text that is not JSON, or JSON that is not an array, resets to an empty
/// list. Inside an array each record stands alone: a malformed one is
/// skipped and the rest are kept.
pub fn parse_tasks(raw: &str) -> Vec<Task> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(serde_json::Value::Array(records)) => records,
        Ok(_) => {
            tracing::warn!("saved tasks are not an array, resetting");
            return Vec::new();
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to parse saved tasks, starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Task>(record) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed saved task");
                None
            }
        })
        .collect()
}

fn read_entry(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to read storage entry");
            None
        }
    }
}

/// Load tasks, locale, and theme. Never fails; bad entries fall back to defaults.
pub fn load_state(storage: &dyn KeyValueStore) -> PersistedState {
    let tasks = read_entry(storage, TASKS_KEY)
        .map(|raw| parse_tasks(&raw))
        .unwrap_or_default();

    let locale = read_entry(storage, LOCALE_KEY)
        .and_then(|code| Locale::from_code(&code))
        .unwrap_or_default();

    let theme = read_entry(storage, THEME_KEY)
        .and_then(|id| Theme::from_id(&id))
        .unwrap_or_default();

    tracing::info!(tasks = tasks.len(), locale = locale.code(), theme = theme.id(), "state loaded");
    PersistedState { tasks, locale, theme }
}

/// Write all entries
pub fn save_state(
    storage: &mut dyn KeyValueStore,
    tasks: &[Task],
    locale: Locale,
    theme: Theme,
) -> Result<()> {
    let json = serde_json::to_string(tasks).context("Failed to serialize tasks")?;
    storage.set(TASKS_KEY, &json)?;
    storage.set(LOCALE_KEY, locale.code())?;
    storage.set(THEME_KEY, theme.id())?;
    Ok(())
}

/// Saves after every change, but never before the initial load has completed
pub struct Persister {
    storage: Box<dyn KeyValueStore>,
    loaded: bool,
    last_saved: Option<(u64, Locale, Theme)>,
}

impl Persister {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            loaded: false,
            last_saved: None,
        }
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Read the saved state and arm saving
    pub fn load(&mut self) -> PersistedState {
        let state = load_state(self.storage.as_ref());
        self.loaded = true;
        state
    }

    /// Save if anything changed since the last save. Returns whether a write happened.
    pub fn sync(&mut self, tasks: &[Task], revision: u64, locale: Locale, theme: Theme) -> Result<bool> {
        if !self.loaded {
            return Ok(false);
        }

        let snapshot = (revision, locale, theme);
        if self.last_saved == Some(snapshot) {
            return Ok(false);
        }

        save_state(self.storage.as_mut(), tasks, locale, theme)?;
        self.last_saved = Some(snapshot);
        tracing::debug!(revision, "state saved");
        Ok(true)
    }
}
