use crate::app::AppState;
use crate::domain::{Locale, Theme, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{accent, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the locale or theme selector, whichever is open
pub fn render_selector(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, options): (&str, Vec<(String, bool, Style)>) = match app.ui_mode {
        UiMode::LocaleSelector => (
            " Language ",
            Locale::all()
                .iter()
                .map(|l| (l.label().to_string(), *l == app.locale, Style::default()))
                .collect(),
        ),
        UiMode::ThemeSelector => (
            " Theme ",
            Theme::all()
                .iter()
                .map(|t| {
                    (
                        t.name().to_string(),
                        *t == app.theme,
                        Style::default().fg(accent(*t)),
                    )
                })
                .collect(),
        ),
        _ => return,
    };

    let title_style = modal_title_style(app.theme);
    let modal_area = create_modal_area(area, options.len() as u16 + 6);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (idx, (name, is_current, swatch)) in options.into_iter().enumerate() {
        let cursor = if idx == app.selector_index { "  › " } else { "    " };
        let mut spans = vec![
            Span::styled(cursor, title_style),
            Span::styled("■ ", swatch),
        ];
        if idx == app.selector_index {
            spans.push(Span::styled(name, title_style));
        } else {
            spans.push(Span::raw(name));
        }
        if is_current {
            spans.push(Span::raw(" ← Current"));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("  [Enter]", title_style),
        Span::raw(" Choose  "),
        Span::styled("[Esc]", title_style),
        Span::raw(" Cancel"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, title_style))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
