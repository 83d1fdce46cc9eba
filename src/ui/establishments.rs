//! Establishments list view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Establishments ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.state.establishments.is_empty() {
        let message = if app.state.backend_connected {
            "No establishments yet. Press n to register one."
        } else {
            "Not signed in. Set an access token in the config file."
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message, Style::default().fg(Color::DarkGray))),
        ])
        .block(block)
        .centered();
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = Vec::new();
    for (idx, est) in app.state.establishments.iter().enumerate() {
        let selected = idx == app.state.selected_index;
        let marker = if selected { "▸ " } else { "  " };
        let name_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(est.name.clone(), name_style),
            Span::styled(
                format!("  DTI {}", est.dti_number),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !est.status.is_empty() {
            spans.push(Span::styled(
                format!("  [{}]", est.status),
                Style::default().fg(status_color(&est.status)),
            ));
        }
        lines.push(Line::from(spans));

        if selected && !est.address.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", est.address),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let list = Paragraph::new(lines).block(block);
    frame.render_widget(list, area);
}

fn status_color(status: &str) -> Color {
    match status {
        "approved" => Color::Green,
        "rejected" => Color::Red,
        // pending and anything the backend adds later
        _ => Color::Yellow,
    }
}
