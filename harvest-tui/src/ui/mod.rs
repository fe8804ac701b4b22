use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

mod form_view;
mod source_view;
mod table_view;
mod toast_view;
pub(super) mod utils;

const LABEL: &str = "Récoltes";

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(frame.area());

    render_header(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Table => table_view::render_table_view(frame, app, body),
        View::SelectSource => source_view::render_source_selection(frame, app, body),
        View::Form => form_view::render_form_view(frame, app, body),
    }

    toast_view::render_toasts(frame, app);
}

/// Throbber, app label and the selected source.
fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let throbber_area = Rect {
        x: area.x + 1,
        y: area.y,
        width: 1,
        height: 1,
    };
    let label_area = Rect {
        x: throbber_area.x + 2,
        y: area.y,
        width: area.width.saturating_sub(3),
        height: 1,
    };

    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);

    let source = app
        .workbench
        .selected_source()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "aucune source".to_string());

    let spans = vec![
        Span::styled(
            LABEL,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(source, Style::default().fg(Color::White)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), label_area);
}

/// Bottom "Controls" box shared by every view.
fn render_controls(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        let sep = if i + 1 < hints.len() { "  " } else { "" };
        spans.push(Span::raw(format!(": {action}{sep}")));
    }

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}
