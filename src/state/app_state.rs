//! Application state definitions

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::wizard::ApplicationType;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Establishment list for the signed-in owner
    #[default]
    Establishments,
    /// Establishment registration wizard (4 steps)
    Registration,
    /// Certificate application wizard (3 steps)
    Application,
}

impl View {
    pub fn is_wizard(self) -> bool {
        matches!(self, View::Registration | View::Application)
    }
}

/// Establishment summary row as returned by the record store
#[derive(Debug, Clone, Deserialize)]
pub struct Establishment {
    pub id: String,
    pub name: String,
    pub dti_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date_registered: Option<DateTime<Utc>>,
}

/// Discard-confirmation prompt raised when a dirty wizard is closed
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardPrompt {
    /// True while the destructive "Discard" option is highlighted
    pub discard_selected: bool,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub establishments: Vec<Establishment>,
    pub selected_index: usize,

    // Backend status
    pub backend_connected: bool,
    pub session_user: Option<String>,

    // Modal overlays
    pub pending_discard: Option<DiscardPrompt>,
    pub pending_application: Option<ApplicationType>,
    /// Path being typed for a file field, while the prompt is open
    pub file_prompt: Option<String>,

    // Transient status bar notice
    pub status_message: Option<String>,

    // Error dialog queue
    errors: Vec<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
    }

    /// Selected establishment, if the list is non-empty
    pub fn selected_establishment(&self) -> Option<&Establishment> {
        self.establishments.get(self.selected_index)
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(|s| s.as_str())
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}
