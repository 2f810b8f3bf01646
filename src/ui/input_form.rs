use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FORM_HEIGHT: u16 = 13;

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let accent = modal_title_style(app.theme);
    let modal_area = create_modal_area(area, FORM_HEIGHT);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let field = |label: &'static str, value: &str, editing: bool| -> Vec<Line<'static>> {
        let label = if editing {
            format!("{} (editing)", label)
        } else {
            label.to_string()
        };
        vec![
            Line::raw(label),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(value.to_string(), accent),
                if editing {
                    Span::styled("█", accent) // Cursor
                } else {
                    Span::raw("")
                },
            ]),
            Line::raw(""),
        ]
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(field("What needs doing?", &form.title, form.editing_field == 0));
    lines.extend(field(
        "Due (optional): YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM",
        &form.due,
        form.editing_field == 1,
    ));

    match &form.error {
        Some(error) => lines.push(Line::styled(error.clone(), error_style())),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::styled(
        "Tab to switch fields  ·  Enter to add  ·  Esc to cancel",
        hint_style(),
    ));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", accent))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
