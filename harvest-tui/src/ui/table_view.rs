use super::*;
use harvest::domain::TableView;
use ratatui::text::Text;
use ratatui::widgets::{Cell, Row, Table};

pub fn render_table_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Controls
        ])
        .split(body);

    let view = app.workbench.table_view();

    match &view {
        Some(view) => {
            render_stats(frame, chunks[0], view);
            render_table(frame, chunks[1], app, view);
        }
        None => {
            let placeholder = Paragraph::new("No data available")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(placeholder, chunks[1]);
        }
    }

    let hints: &[(&str, &str)] = if app.is_editing_filter() {
        &[("Type", "Filter"), ("←→", "Cursor"), ("Enter/Esc", "Done")]
    } else {
        &[
            ("←→/h/l", "Column"),
            ("↑↓/j/k", "Scroll"),
            ("/", "Filter"),
            ("Ctrl+X", "Clear filters"),
            ("n", "New entry"),
            ("s", "Source"),
            ("r", "Reload"),
            ("q", "Quit"),
        ]
    };
    render_controls(frame, chunks[2], hints);
}

fn render_stats(frame: &mut Frame, area: Rect, view: &TableView) {
    let mut spans = Vec::new();
    for (i, (label, value)) in view.stats.summary().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            value,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let stats = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(stats, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App, view: &TableView) {
    let filters = app.workbench.filters();

    let header_cells = view.headers.iter().enumerate().map(|(col, name)| {
        let focused = col == app.table.focused_column;
        let filter_line = match (&app.table.filter_input, focused) {
            (Some(input), true) => {
                let (before, after) = input.split_at_cursor();
                Line::from(Span::styled(
                    format!("{before}█{after}"),
                    Style::default().fg(Color::White),
                ))
            }
            _ if !filters.get(col).is_empty() => Line::from(Span::styled(
                format!("/{}", filters.get(col)),
                Style::default().fg(Color::Green),
            )),
            _ => Line::from(""),
        };

        let name_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        Cell::from(Text::from(vec![
            Line::from(Span::styled(name.clone(), name_style)),
            filter_line,
        ]))
    });
    let header = Row::new(header_cells).height(2).bottom_margin(1);

    let rows = view
        .rows
        .iter()
        .skip(app.table.scroll)
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))));

    let column_count = view.headers.len().max(1) as u32;
    let widths = vec![Constraint::Ratio(1, column_count); view.headers.len()];

    let title = format!(" {} ({}/{}) ", view.title, view.rows.len(), view.total_rows);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(table, area);
}
