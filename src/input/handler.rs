use crate::app::AppState;
use crate::domain::{FilterMode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::Dragging => handle_dragging_mode(app, key),
        UiMode::LocaleSelector | UiMode::ThemeSelector => handle_selector_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Task actions
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Enter | KeyCode::Right | KeyCode::Left | KeyCode::Char('e') => app.toggle_expand(),
        KeyCode::Char('b') => app.request_breakdown(),
        KeyCode::Char('a') | KeyCode::Char('n') => app.start_add_task(),
        KeyCode::Char('g') => app.start_drag(),

        // Filters
        KeyCode::Tab | KeyCode::Char('f') => app.cycle_filter(),
        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Active),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),

        // Popups
        KeyCode::Char('l') => app.open_locale_selector(),
        KeyCode::Char('t') => app.open_theme_selector(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while the add-task form is open
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a task is grabbed
fn handle_dragging_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.drag_step(false),
        KeyCode::Down | KeyCode::Char('j') => app.drag_step(true),
        KeyCode::Char('g') | KeyCode::Enter | KeyCode::Esc => app.end_drag(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the locale and theme popups
fn handle_selector_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.selector_up(),
        KeyCode::Down | KeyCode::Char('j') => app.selector_down(),
        KeyCode::Enter => app.selector_confirm(),
        KeyCode::Esc | KeyCode::Char('q') => app.selector_cancel(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locale;
    use crate::persistence::storage::MemoryStore;
    use crate::persistence::Persister;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Persister::new(Box::new(MemoryStore::default())));
        app.store.add_task("Second", None);
        app.store.add_task("First", None);
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn titles(app: &AppState) -> Vec<String> {
        app.store.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Char('k'))).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        app.start_add_task();
        assert!(handle_key(&mut app, ctrl_c).unwrap());
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.store.len();

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        // 'q' is just a letter while typing
        for c in "Quiz".chars() {
            assert!(!handle_key(&mut app, key(KeyCode::Char(c))).unwrap());
        }

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.store.len(), initial_count + 1);
        assert_eq!(app.store.tasks()[0].title, "Quiz");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_handle_add_task_with_due_date() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('X'))).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        for c in "2030-01-02 10:00".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(app.store.tasks()[0].due_date.is_some());
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('z'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_handle_toggle_and_delete() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.store.tasks()[0].completed);

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert_eq!(titles(&app), vec!["Second"]);
    }

    #[test]
    fn test_handle_drag() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('g'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Dragging);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(titles(&app), vec!["Second", "First"]);

        // Selection keys move the task, not the cursor
        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(titles(&app), vec!["First", "Second"]);

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_filters() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.filter, FilterMode::Completed);
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.filter, FilterMode::All);
    }

    #[test]
    fn test_handle_locale_selector() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('l'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::LocaleSelector);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.locale, Locale::Fr);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
