use super::*;
use crate::app::{FormField, FormFocus, FormState, TextInput};
use harvest::domain::{DerivedMetrics, EntryDraft, RowModel};

pub fn render_form_view(frame: &mut Frame, app: &App, body: Rect) {
    let (Some(form), Some(model)) = (app.form.as_ref(), app.form_model()) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Date
            Constraint::Min(0),    // Rows
            Constraint::Length(3), // Controls
        ])
        .split(body);

    render_date(frame, chunks[0], form, model);
    render_rows(frame, chunks[1], form, model);

    let mut hints = vec![
        ("Tab/S-Tab", "Field"),
        ("←→", "Change"),
        ("Ctrl+N", "Add row"),
        ("Ctrl+D", "Remove row"),
        ("Ctrl+S", "Submit"),
        ("Esc", "Cancel"),
    ];
    if app.submit_pending {
        hints.insert(0, ("…", "Envoi en cours"));
    }
    render_controls(frame, chunks[2], &hints);
}

fn render_date(frame: &mut Frame, area: Rect, form: &FormState, model: &RowModel) {
    let focused = form.focus == FormFocus::Date;
    let week = match model.week_number() {
        0 => "-".to_string(),
        n => n.to_string(),
    };

    let line = Line::from(vec![
        input_span(&form.date_input, focused, "AAAA-MM-JJ"),
        Span::styled("    Semaine: ", Style::default().fg(Color::DarkGray)),
        Span::styled(week, Style::default().fg(Color::Cyan)),
    ]);

    let border = if focused { Color::Yellow } else { Color::White };
    let date = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Date ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(date, area);
}

fn render_rows(frame: &mut Frame, area: Rect, form: &FormState, model: &RowModel) {
    let mut lines = Vec::new();
    for (row, (draft, inputs)) in model.drafts().iter().zip(&form.rows).enumerate() {
        let focus_on = |field: FormField| form.focus == FormFocus::Row { row, field };
        let row_focused = form.focused_row() == Some(row);

        let marker_style = if row_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{:>2}. ", row + 1), marker_style)];

        spans.push(selector_span(&draft.plot.to_string(), focus_on(FormField::Plot)));
        spans.push(Span::raw("  "));
        spans.push(selector_span(&draft.kind.to_string(), focus_on(FormField::Kind)));

        spans.push(label("  Brut: "));
        spans.push(input_span(
            &inputs.raw_weight,
            focus_on(FormField::RawWeight),
            "kg",
        ));

        spans.push(label("  Fini: "));
        if draft.kind.is_raw() {
            spans.push(Span::styled("0", Style::default().fg(Color::DarkGray)));
        } else {
            spans.push(input_span(
                &inputs.finished_weight,
                focus_on(FormField::FinishedWeight),
                "kg",
            ));
        }

        spans.push(label("  Surface: "));
        spans.push(input_span(
            &inputs.surface_area,
            focus_on(FormField::SurfaceArea),
            "m²",
        ));

        spans.push(Span::raw("  "));
        spans.push(selector_span(&draft.cut.to_string(), focus_on(FormField::Cut)));

        lines.push(Line::from(spans));
        lines.push(metrics_line(draft));
    }

    let title = format!(" Entrées ({}) ", model.len());
    let rows = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(rows, area);
}

/// Ratios preview, shown once the row is complete.
fn metrics_line(draft: &EntryDraft) -> Line<'static> {
    let (Some(raw), Some(surface)) = (draft.raw_weight, draft.surface_area) else {
        return Line::from("");
    };
    let metrics = DerivedMetrics::compute(
        draft.kind,
        raw,
        draft.finished_weight.unwrap_or(0.0),
        surface,
    );
    Line::from(Span::styled(
        format!(
            "     kg/m² brut {}  kg/m² fini {}  perte {}",
            metrics.raw_ratio, metrics.finished_ratio, metrics.loss_percent
        ),
        Style::default().fg(Color::DarkGray),
    ))
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn selector_span(value: &str, focused: bool) -> Span<'static> {
    if focused {
        Span::styled(
            format!("◀ {value} ▶"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("[{value}]"), Style::default().fg(Color::White))
    }
}

fn input_span(input: &TextInput, focused: bool, placeholder: &str) -> Span<'static> {
    if focused {
        let (before, after) = input.split_at_cursor();
        Span::styled(
            format!("{before}█{after}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if input.value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(input.value.clone(), Style::default().fg(Color::White))
    }
}
