//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Shared chrome for centered dialog overlays. Callers build the body
/// lines; the frame handles sizing, clearing, and the border.
pub struct DialogFrame<'a> {
    /// Dialog title, shown bold in the accent color
    pub title: &'a str,
    /// Color for the title and border
    pub accent: Color,
    /// Total dialog width including borders
    pub width: u16,
}

impl DialogFrame<'_> {
    pub fn render(&self, frame: &mut Frame, body: Vec<Line>) {
        let area = frame.area();
        let width = self.width.min(area.width);
        // title + blank + body + borders
        let height = (body.len() as u16 + 4).min(area.height);

        let dialog_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, dialog_area);

        let mut content = vec![
            Line::from(Span::styled(
                self.title,
                Style::default()
                    .fg(self.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        content.extend(body);

        let dialog = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent))
                    .style(Style::default().bg(Color::Black)),
            )
            .style(Style::default().bg(Color::Black).fg(Color::White));

        frame.render_widget(dialog, dialog_area);
    }
}

/// Word-wrap a message into lines of at most `max_width` characters
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + word.len() + 1 > max_width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// One highlighted selection row ("▸ Label" when selected)
pub fn option_line(label: &str, color: Color, selected: bool) -> Line<'static> {
    let prefix = if selected { "▸ " } else { "  " };
    let style = if selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(format!("{prefix}{label}"), style))
}

/// Bottom hint line built from (key, action) pairs
pub fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::Cyan),
        ));
        let sep = if i + 1 < pairs.len() { "  " } else { "" };
        spans.push(Span::styled(
            format!(" {action}{sep}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
