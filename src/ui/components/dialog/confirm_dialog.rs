//! Discard-confirmation dialog for a wizard with unsaved changes

use super::base::{key_hints, option_line, DialogFrame};
use crate::state::DiscardPrompt;
use ratatui::{style::Color, text::Line, Frame};

/// Render the discard prompt shown when closing a dirty wizard
pub fn render_confirm_dialog(frame: &mut Frame, prompt: &DiscardPrompt) {
    let body = vec![
        Line::from("You have unsaved changes."),
        Line::from(""),
        option_line("Continue Editing", Color::White, !prompt.discard_selected),
        option_line("Discard Changes", Color::Red, prompt.discard_selected),
        Line::from(""),
        key_hints(&[("↑↓", "select"), ("Enter", "confirm"), ("Esc", "back")]),
    ];

    DialogFrame {
        title: "Discard changes?",
        accent: Color::Yellow,
        width: 44,
    }
    .render(frame, body);
}
