//! Dialog components for TUI

mod base;
mod confirm_dialog;
mod error_dialog;
mod input_dialog;
mod picker_dialog;

pub use confirm_dialog::render_confirm_dialog;
pub use error_dialog::render_error_dialog;
pub use input_dialog::render_file_prompt;
pub use picker_dialog::render_picker_dialog;
