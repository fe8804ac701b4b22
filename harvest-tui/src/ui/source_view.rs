use super::*;
use ratatui::widgets::{List, ListItem};

pub fn render_source_selection(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Min(0),    // Source list
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let selected = app.workbench.selected_index();
    let items: Vec<ListItem> = app
        .workbench
        .sources()
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let marker = if Some(i) == selected { "● " } else { "  " };
            let style = if i == app.source_cursor {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{marker}{}", source.name)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" Sources ({}) ", app.workbench.sources().len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, chunks[0]);

    render_controls(
        frame,
        chunks[1],
        &[
            ("↑↓/j/k", "Navigate"),
            ("Enter", "Select"),
            ("Esc", "Cancel"),
            ("q", "Quit"),
        ],
    );
}
