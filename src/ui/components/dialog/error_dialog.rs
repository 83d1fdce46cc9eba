//! Error dialog component

use super::base::{key_hints, wrap_text, DialogFrame};
use ratatui::{style::Color, text::Line, Frame};

const WIDTH: u16 = 60;

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let mut body: Vec<Line> = wrap_text(error_message, (WIDTH - 4) as usize)
        .into_iter()
        .map(Line::from)
        .collect();
    body.push(Line::from(""));
    body.push(key_hints(&[("Enter", "dismiss")]));

    DialogFrame {
        title: "Error",
        accent: Color::Red,
        width: WIDTH,
    }
    .render(frame, body);
}
