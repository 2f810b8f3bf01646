use crate::app::AppState;
use crate::domain::messages::empty_messages;
use crate::domain::{format_due_local, tree_connector, SubTask, Task, Theme, UiMode};
use crate::ui::styles::{
    border_style, default_style, done_style, due_style, grabbed_style, hint_style, loading_style,
    overdue_style, selected_style, title_style, tree_style,
};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the task list, or the empty state for the current filter
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Tasks ", title_style(theme)));

    let rows = app.rows();
    if rows.is_empty() {
        let (headline, hint) = empty_messages(app.filter);
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled(headline, title_style(theme)),
            Line::styled(hint, hint_style()),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let now = Utc::now();
    let tasks = app.store.tasks();
    let dragging = app.ui_mode == UiMode::Dragging;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let task = &tasks[row.task_index];
            let line = match row.subtask_index {
                Some(st_idx) => create_subtask_line(&task.subtasks[st_idx], row.is_last),
                None => create_task_line(task, theme, now),
            };
            ListItem::new(line)
        })
        .collect();

    let highlight = if dragging {
        grabbed_style(theme)
    } else {
        selected_style(theme)
    };
    let list = List::new(items)
        .block(block)
        .style(default_style())
        .highlight_style(highlight)
        .highlight_symbol(if dragging { "⇅ " } else { "› " });

    let mut state = ListState::default();
    state.select(Some(app.selected_index.min(rows.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}

/// Single line for a task
/// Format: [x] Title  (2/3)  ⏰ Today 14:30  ✨ thinking...
fn create_task_line(task: &Task, theme: Theme, now: DateTime<Utc>) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox));

    let title_style = if task.completed {
        done_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(task.title.clone(), title_style));

    if !task.subtasks.is_empty() {
        let (done, total) = task.subtask_progress();
        let fold = if task.is_expanded { "▾" } else { "▸" };
        spans.push(Span::styled(
            format!("  {} {}/{}", fold, done, total),
            tree_style(),
        ));
    }

    if let Some(due) = task.due_date {
        let (label, style) = if task.is_overdue(now) {
            (format!("  ⏰ Overdue: {}", format_due_local(due)), overdue_style())
        } else {
            (format!("  ⏰ {}", format_due_local(due)), due_style(theme))
        };
        spans.push(Span::styled(label, style));
    }

    if task.ai_loading {
        spans.push(Span::styled("  ✨ thinking...", loading_style(theme)));
    }

    Line::from(spans)
}

fn create_subtask_line(subtask: &SubTask, is_last: bool) -> Line<'static> {
    let checkbox = if subtask.completed { "[x] " } else { "[ ] " };
    let style = if subtask.completed {
        done_style()
    } else {
        default_style()
    };

    Line::from(vec![
        Span::styled(format!("    {} ", tree_connector(is_last)), tree_style()),
        Span::raw(checkbox),
        Span::styled(subtask.title.clone(), style),
    ])
}
