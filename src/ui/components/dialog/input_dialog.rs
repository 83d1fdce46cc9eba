//! File-path input dialog for document upload fields

use super::base::{key_hints, DialogFrame};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    Frame,
};

const WIDTH: u16 = 64;

/// Render the file-path prompt for the active upload field
pub fn render_file_prompt(frame: &mut Frame, buffer: &str) {
    // Keep the tail visible once the path outgrows the dialog
    let visible_width = (WIDTH - 6) as usize;
    let shown: String = buffer
        .chars()
        .rev()
        .take(visible_width)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let body = vec![
        Line::from("Enter the path to the document:"),
        Line::from(""),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(shown, Style::default().fg(Color::White)),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        key_hints(&[("Enter", "attach"), ("Esc", "cancel")]),
    ];

    DialogFrame {
        title: "Attach File",
        accent: Color::Cyan,
        width: WIDTH,
    }
    .render(frame, body);
}
