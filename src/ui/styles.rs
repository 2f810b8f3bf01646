use crate::domain::{Theme, ToastKind};
use ratatui::style::{Color, Modifier, Style};

/// Primary accent colour for a theme
pub fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Sunset => Color::Rgb(249, 115, 22),
        Theme::Ocean => Color::Rgb(14, 165, 233),
        Theme::Forest => Color::Rgb(34, 197, 94),
        Theme::Dream => Color::Rgb(168, 85, 247),
    }
}

/// Secondary colour used for highlights alongside the accent
pub fn accent_secondary(theme: Theme) -> Color {
    match theme {
        Theme::Sunset => Color::Rgb(236, 72, 153),
        Theme::Ocean => Color::Rgb(45, 212, 191),
        Theme::Forest => Color::Rgb(163, 230, 53),
        Theme::Dream => Color::Rgb(244, 114, 182),
    }
}

/// Colours confetti is drawn in
pub const CONFETTI_COLORS: [Color; 6] = [
    Color::Rgb(34, 197, 94),
    Color::Rgb(234, 179, 8),
    Color::Rgb(236, 72, 153),
    Color::Rgb(59, 130, 246),
    Color::Rgb(168, 85, 247),
    Color::Rgb(244, 63, 94),
];

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Row being dragged
pub fn grabbed_style(theme: Theme) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(accent_secondary(theme))
        .add_modifier(Modifier::BOLD)
}

/// Completed task or subtask
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Due date that has passed
pub fn overdue_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Due date still ahead
pub fn due_style(theme: Theme) -> Style {
    Style::default().fg(accent_secondary(theme))
}

/// Breakdown in flight
pub fn loading_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::ITALIC)
}

/// Tree connector style (for subtasks)
pub fn tree_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style(theme: Theme) -> Style {
    Style::default()
        .fg(accent(theme))
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Toast border and text
pub fn toast_style(kind: ToastKind, theme: Theme) -> Style {
    let fg = match kind {
        ToastKind::Success => accent(theme),
        ToastKind::Roast => Color::Red,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}
