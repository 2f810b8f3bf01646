use crate::app::AppState;
use crate::domain::ToastKind;
use crate::ui::styles::{toast_style, CONFETTI_COLORS};
use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::{
    layout::{Alignment, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const CONFETTI_GLYPHS: [&str; 6] = ["*", "•", "✦", "◆", "▪", "·"];
const CONFETTI_DENSITY: f64 = 0.15;

/// Render the toast over the status area
pub fn render_toast(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(toast) = app.feedback.toast() else {
        return;
    };

    let style = toast_style(toast.kind, app.theme);
    let icon = match toast.kind {
        ToastKind::Success => "🔥",
        ToastKind::Roast => "💀",
    };

    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(Line::from(vec![
        Span::raw(format!("{} ", icon)),
        Span::styled(toast.message.clone(), style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(paragraph, area);
}

/// Scatter confetti over the given area while a celebration is running.
///
/// Only the confetti cells are drawn; the list shows through the gaps.
pub fn render_confetti(f: &mut Frame, app: &AppState, area: Rect) {
    if !app.feedback.is_celebrating() {
        return;
    }

    let mut rng = rand::thread_rng();
    let buffer = f.buffer_mut();
    for (x, y, glyph, color) in confetti_cells(&mut rng, area) {
        buffer.get_mut(x, y).set_symbol(glyph).set_fg(color);
    }
}

fn confetti_cells<R: Rng>(rng: &mut R, area: Rect) -> Vec<(u16, u16, &'static str, Color)> {
    let mut cells = Vec::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if rng.gen_bool(CONFETTI_DENSITY) {
                let glyph = CONFETTI_GLYPHS.choose(rng).copied().unwrap_or("*");
                let color = CONFETTI_COLORS.choose(rng).copied().unwrap_or(Color::White);
                cells.push((x, y, glyph, color));
            }
        }
    }
    cells
}
