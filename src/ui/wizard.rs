//! Wizard rendering: progress header, step fields, and the review step

use crate::app::App;
use crate::state::wizard::{FieldId, FieldKind, FieldValue, Wizard, WizardForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const FIELD_HEIGHT: u16 = 3;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(wizard) = app.wizard.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Fields
        ])
        .split(area);

    draw_header(frame, chunks[0], wizard);

    if wizard.form.on_last_step() {
        draw_review_step(frame, chunks[1], wizard);
    } else {
        draw_fields(frame, chunks[1], wizard);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let form = &wizard.form;
    let step_title = form
        .kind()
        .step(form.step())
        .map(|s| s.title)
        .unwrap_or_default();

    let mut spans = vec![
        Span::styled(
            wizard.title(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  Step {} of {}: {}", form.step(), form.step_count(), step_title),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if wizard.busy() {
        spans.push(Span::styled(
            "  ● working...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(vec![Line::from(spans), Line::from(progress_dots(form))]);
    frame.render_widget(header, area);
}

/// One dot per step, filled up to and including the current one
fn progress_dots(form: &WizardForm) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for step in 1..=form.step_count() {
        let (dot, color) = if step <= form.step() {
            ("●", Color::Cyan)
        } else {
            ("○", Color::DarkGray)
        };
        spans.push(Span::styled(format!("{dot} "), Style::default().fg(color)));
    }
    spans
}

/// Draw the current step's fields, scrolled so the active one stays
/// visible
fn draw_fields(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let fields = wizard.form.visible_fields();
    if fields.is_empty() {
        return;
    }
    let active = wizard.active_field();
    let active_index = fields
        .iter()
        .position(|f| Some(*f) == active)
        .unwrap_or(0);

    let heights: Vec<u16> = fields
        .iter()
        .map(|f| {
            let error = wizard.form.error(*f).is_some();
            FIELD_HEIGHT + u16::from(error)
        })
        .collect();

    let start = scroll_start(&heights, active_index, area.height);

    let mut y = area.y;
    for (idx, field) in fields.iter().enumerate().skip(start) {
        let height = heights[idx];
        if y + FIELD_HEIGHT > area.y + area.height {
            break;
        }
        let field_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: FIELD_HEIGHT,
        };
        draw_field(frame, field_area, &wizard.form, *field, Some(*field) == active);

        if let Some(message) = wizard.form.error(*field) {
            let error_y = y + FIELD_HEIGHT;
            if error_y < area.y + area.height {
                let error_area = Rect {
                    x: area.x + 1,
                    y: error_y,
                    width: area.width.saturating_sub(1),
                    height: 1,
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::Red),
                    )),
                    error_area,
                );
            }
        }
        y += height;
    }
}

/// First field index to render so the active field fits in `avail` rows
fn scroll_start(heights: &[u16], active: usize, avail: u16) -> usize {
    let mut start = 0;
    while start < active {
        let used: u16 = heights[start..=active].iter().sum();
        if used <= avail {
            break;
        }
        start += 1;
    }
    start
}

fn draw_field(frame: &mut Frame, area: Rect, form: &WizardForm, field: FieldId, is_active: bool) {
    let accent = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = display_for(form, field, is_active);
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Text-like fields get a cursor; choices and toggles do not
    let editable = matches!(field.kind(), FieldKind::Text | FieldKind::Numeric);
    let cursor = if is_active && editable { "▌" } else { "" };

    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(accent);

    frame.render_widget(content.block(block), area);
}

/// Kind-aware value text for a field box
fn display_for(form: &WizardForm, field: FieldId, is_active: bool) -> String {
    match (field.kind(), form.value(field)) {
        (FieldKind::Select(_), value) => {
            let text = value.as_text();
            let shown = if text.is_empty() { "(none)" } else { text };
            if is_active {
                format!("◂ {shown} ▸")
            } else {
                shown.to_string()
            }
        }
        (FieldKind::Flag, FieldValue::Flag(on)) => {
            let mark = if *on { "[x]" } else { "[ ]" };
            format!("{mark} {}", if *on { "Yes" } else { "No" })
        }
        (_, value) => value.display_value(),
    }
}

/// The terminal step: a summary of everything entered plus the
/// certification toggle
fn draw_review_step(frame: &mut Frame, area: Rect, wizard: &Wizard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Summary
            Constraint::Length(FIELD_HEIGHT),  // Certify toggle
            Constraint::Length(1),             // Certify error
        ])
        .split(area);

    let summary = Paragraph::new(review_lines(&wizard.form)).block(
        Block::default()
            .title(" Review ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(summary, chunks[0]);

    let active = wizard.active_field();
    draw_field(
        frame,
        chunks[1],
        &wizard.form,
        FieldId::Certify,
        active == Some(FieldId::Certify),
    );
    if let Some(message) = wizard.form.error(FieldId::Certify) {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )),
            chunks[2],
        );
    }
}

/// Per-step "Label: value" lines for every filled-in field
fn review_lines(form: &WizardForm) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let steps = form.kind().steps();

    for step in &steps[..steps.len().saturating_sub(1)] {
        lines.push(Line::from(Span::styled(
            step.title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));

        for field in step.fields {
            let shown = match form.value(*field) {
                FieldValue::Text(s) if s.is_empty() => continue,
                FieldValue::Flag(false) => continue,
                value => match value.as_file() {
                    Some(file) => match file.as_pending() {
                        Some(handle) => handle.file_name().to_string(),
                        None => continue,
                    },
                    None => value.display_value(),
                },
            };
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {}: ", field.label()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(shown, Style::default().fg(Color::Gray)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines
}
