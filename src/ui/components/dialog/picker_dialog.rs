//! Application-type picker dialog

use super::base::{key_hints, option_line, DialogFrame};
use crate::state::wizard::ApplicationType;
use ratatui::{style::Color, text::Line, Frame};

const TYPES: [ApplicationType; 3] = [
    ApplicationType::Fsec,
    ApplicationType::FsicOccupancy,
    ApplicationType::FsicBusiness,
];

/// Render the certificate-type picker for a new application
pub fn render_picker_dialog(frame: &mut Frame, selected: ApplicationType) {
    let mut body = vec![Line::from("Choose the certificate to apply for:"), Line::from("")];
    for ty in TYPES {
        body.push(option_line(ty.label(), Color::Cyan, ty == selected));
    }
    body.push(Line::from(""));
    body.push(key_hints(&[
        ("↑↓", "select"),
        ("Enter", "start"),
        ("Esc", "cancel"),
    ]));

    DialogFrame {
        title: "New Application",
        accent: Color::Cyan,
        width: 48,
    }
    .render(frame, body);
}
