//! Layout helpers and the status bar

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the frame into content and the bottom status line
pub fn content_area(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Outcome of the last action
    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    // Signed-in user
    if let Some(user) = &app.state.session_user {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            short_user(user),
            Style::default().fg(Color::Blue),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    if app.state.file_prompt.is_some() {
        return "type path  Enter:attach  Esc:cancel".to_string();
    }
    match app.state.current_view {
        View::Establishments => "j/k:nav  n:register  a:apply  r:refresh  q:quit".to_string(),
        View::Registration | View::Application => {
            let mut hints =
                "Tab:field  ←→:option  Space:toggle/file  Enter:next  PgUp:back".to_string();
            if app
                .wizard
                .as_ref()
                .is_some_and(|w| w.form.on_last_step())
            {
                hints.push_str(&format!("  {SUBMIT_SHORTCUT}:submit"));
            }
            hints.push_str("  Esc:cancel");
            hints
        }
    }
}

/// Trim a backend user id down to a status-bar-sized tag
fn short_user(user: &str) -> String {
    match user.split('-').next() {
        Some(head) if head.len() < user.len() => format!("user {head}"),
        _ => format!("user {user}"),
    }
}
