//! UI module for rendering the TUI

mod components;
mod establishments;
mod layout;
mod wizard;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let content = layout::content_area(area);

    if app.state.current_view.is_wizard() {
        wizard::draw(frame, content, app);
    } else {
        establishments::draw(frame, content, app);
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays, in the same precedence order as key handling
    if let Some(buffer) = &app.state.file_prompt {
        components::render_file_prompt(frame, buffer);
    }
    if let Some(ty) = app.state.pending_application {
        components::render_picker_dialog(frame, ty);
    }
    if let Some(prompt) = &app.state.pending_discard {
        components::render_confirm_dialog(frame, prompt);
    }
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error);
    }
}
