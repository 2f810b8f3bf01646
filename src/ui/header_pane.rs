use crate::app::AppState;
use crate::domain::messages::buddy_message;
use crate::domain::{active_count, buddy_tier, status_line, FilterMode, Theme};
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Render the header: buddy message, locale and theme, filter tabs
pub fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Let's Get It, Buddy ", title_style(theme)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let tier = buddy_tier(active_count(app.store.tasks()));
    let message = Paragraph::new(vec![
        Line::styled(buddy_message(tier), default_style()),
        Line::from(vec![
            Span::styled(
                format!("{} · {}", app.locale.label(), app.theme.name()),
                hint_style(),
            ),
        ]),
    ]);

    let message_area = Rect { height: inner.height.min(2), ..inner };
    f.render_widget(message, message_area);

    if inner.height > 2 {
        let tabs_area = Rect {
            y: inner.y + 2,
            height: 1,
            ..inner
        };
        f.render_widget(filter_tabs(app.filter, theme), tabs_area);
    }
}

fn filter_tabs(filter: FilterMode, theme: Theme) -> Tabs<'static> {
    let titles: Vec<Line> = FilterMode::all()
        .iter()
        .enumerate()
        .map(|(i, mode)| Line::raw(format!("{} {}", i + 1, mode.label())))
        .collect();
    let selected = FilterMode::all()
        .iter()
        .position(|m| *m == filter)
        .unwrap_or(0);

    Tabs::new(titles)
        .select(selected)
        .style(hint_style())
        .highlight_style(selected_style(theme))
        .divider("│")
}

/// Render the status line under the list
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::styled(status_line(app.store.tasks()), default_style()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style()),
        );
    f.render_widget(paragraph, area);
}
