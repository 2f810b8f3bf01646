pub mod feedback_overlay;
pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use feedback_overlay::{render_confetti, render_toast};
use header_pane::{render_header, render_status};
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_selector;
use ratatui::{layout::Rect, Frame};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_header(f, app, layout.header_area);
    render_list_pane(f, app, layout.list_area);
    render_status(f, app, layout.status_area);

    // Confetti rains over the top of the list
    let confetti_area = Rect {
        x: layout.list_area.x + 1,
        y: layout.list_area.y,
        width: layout.list_area.width.saturating_sub(2),
        height: layout.list_area.height.min(3),
    };
    render_confetti(f, app, confetti_area);
    render_toast(f, app, layout.status_area);

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    if matches!(app.ui_mode, UiMode::LocaleSelector | UiMode::ThemeSelector) {
        render_selector(f, app, size);
    }
}
