use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the keys that do something in the given mode
pub fn hints(mode: UiMode) -> &'static str {
    match mode {
        UiMode::Normal => {
            " ↑/↓ select   space done   enter expand   b break down   a add   d delete   \
             g grab   f/1-3 filter   l language   t theme   q quit"
        }
        UiMode::AddingTask => " tab switch field   enter add   esc cancel",
        UiMode::Dragging => " ↑/↓ move task   g/enter/esc drop",
        UiMode::LocaleSelector | UiMode::ThemeSelector => " ↑/↓ choose   enter apply   esc cancel",
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(mode))).style(hint_style());
    f.render_widget(paragraph, area);
}
