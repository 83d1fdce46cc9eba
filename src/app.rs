//! Application core: key routing and wizard driving
//!
//! The wizard state machines under `state::wizard` never touch the
//! backend themselves; this layer runs their request/apply cycle,
//! holding the await between the two phases so a probe or submission
//! fully resolves before the next key is processed.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info};

use crate::backend::{BackendClient, RecordStore};
use crate::config::TuiConfig;
use crate::state::wizard::{
    ApplicationType, CancelRequest, FieldId, FieldKind, FieldValue, FileHandle, NextOutcome,
    NextRequest, SubmitOutcome, SubmitRequest, Wizard,
};
use crate::state::{AppState, DiscardPrompt, View};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// REST client for the hosted backend
    pub backend: BackendClient,
    /// The open wizard, while a registration or application is underway
    pub wizard: Option<Wizard>,
    /// Loaded configuration (address defaults seed new wizards)
    config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub async fn new() -> Result<Self> {
        let config = TuiConfig::load()?;
        let backend = BackendClient::connect(&config).await;

        let mut state = AppState::default();
        state.session_user = backend.user_id().map(str::to_string);
        state.backend_connected = state.session_user.is_some();

        let mut app = Self {
            state,
            backend,
            wizard: None,
            config,
            quit: false,
        };
        app.refresh_establishments().await;
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Reload the establishment list for the signed-in owner
    async fn refresh_establishments(&mut self) {
        let Some(user) = self.state.session_user.clone() else {
            return;
        };
        match self.backend.list_establishments(&user).await {
            Ok(establishments) => {
                self.state.establishments = establishments;
                self.state.reset_selection();
            }
            Err(err) => {
                error!(error = %err, "could not load establishments");
                self.state
                    .push_error(format!("Could not load establishments: {err}"));
            }
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Discard-confirmation prompt (modal)
        if self.state.pending_discard.is_some() {
            self.handle_discard_prompt_key(key);
            return Ok(());
        }

        // Application-type picker (modal)
        if self.state.pending_application.is_some() {
            self.handle_type_picker_key(key);
            return Ok(());
        }

        // File-path prompt (modal)
        if self.state.file_prompt.is_some() {
            self.handle_file_prompt_key(key);
            return Ok(());
        }

        // Clear any status message on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Establishments => self.handle_establishments_key(key).await?,
            View::Registration | View::Application => self.handle_wizard_key(key).await?,
        }

        Ok(())
    }

    /// Handle keys in the Establishments view
    async fn handle_establishments_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let total = self.state.establishments.len();
                self.state.move_selection_down(total);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.move_selection_up();
            }
            KeyCode::Char('n') => {
                self.open_registration();
            }
            KeyCode::Char('a') | KeyCode::Enter => {
                if self.state.selected_establishment().is_some() {
                    self.state.pending_application = Some(ApplicationType::default());
                }
            }
            KeyCode::Char('r') => {
                self.refresh_establishments().await;
            }
            KeyCode::Char('q') => {
                self.quit = true;
            }
            _ => {}
        }
        Ok(())
    }

    /// Open the registration wizard, seeded with configured address
    /// defaults
    fn open_registration(&mut self) {
        let mut wizard = Wizard::registration();
        let defaults = [
            (FieldId::City, self.config.default_city.clone()),
            (FieldId::Province, self.config.default_province.clone()),
            (FieldId::Region, self.config.default_region.clone()),
        ];
        for (field, value) in defaults {
            if let Some(value) = value {
                wizard.form.seed(field, FieldValue::text(&value));
            }
        }
        self.wizard = Some(wizard);
        self.state.current_view = View::Registration;
    }

    /// Open the application wizard for the selected establishment
    fn open_application(&mut self, ty: ApplicationType) {
        let Some(establishment) = self.state.selected_establishment() else {
            return;
        };
        self.wizard = Some(Wizard::application(ty, establishment.id.clone()));
        self.state.current_view = View::Application;
    }

    fn close_wizard(&mut self) {
        self.wizard = None;
        self.state.current_view = View::Establishments;
    }

    /// Handle keys in either wizard view
    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(wizard) = self.wizard.as_mut() else {
            self.state.current_view = View::Establishments;
            return Ok(());
        };

        // Submit shortcut works from any step; the controller answers
        // NotLastStep until the terminal step is reached
        if key.code == KeyCode::Char('s')
            && key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
        {
            return self.submit_wizard().await;
        }

        let active = wizard.active_field();
        match key.code {
            KeyCode::Esc => match wizard.request_cancel() {
                CancelRequest::Close => self.close_wizard(),
                CancelRequest::Confirm => {
                    self.state.pending_discard = Some(DiscardPrompt::default());
                }
            },
            KeyCode::Tab | KeyCode::Down => wizard.next_field(),
            KeyCode::BackTab | KeyCode::Up => wizard.prev_field(),
            KeyCode::PageUp => wizard.back(),
            KeyCode::PageDown => return self.advance_wizard().await,
            KeyCode::Enter => match active.map(FieldId::kind) {
                Some(FieldKind::File) => self.open_file_prompt(),
                _ if wizard.form.on_last_step() => return self.submit_wizard().await,
                _ => return self.advance_wizard().await,
            },
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = active {
                    wizard.form.cycle_select(field, key.code == KeyCode::Right);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(field) = active {
                    match field.kind() {
                        FieldKind::Flag => wizard.form.toggle_flag(field),
                        FieldKind::File => self.open_file_prompt(),
                        _ => wizard.form.input_char(field, ' '),
                    }
                }
            }
            KeyCode::Delete => {
                if let Some(field) = active {
                    wizard.form.clear_file(field);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = active {
                    wizard.form.backspace(field);
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = active {
                    wizard.form.input_char(field, c);
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Run the Next transition, awaiting the uniqueness probe when the
    /// current step requires one
    async fn advance_wizard(&mut self) -> Result<()> {
        let Some(wizard) = self.wizard.as_mut() else {
            return Ok(());
        };
        match wizard.request_next() {
            NextRequest::Busy | NextRequest::Rejected | NextRequest::Advanced => {}
            NextRequest::Check(check) => {
                let result = check.run(&self.backend).await;
                if let NextOutcome::Backend(err) = wizard.apply_check(result) {
                    error!(error = %err, "uniqueness check failed");
                    self.state
                        .push_error(format!("Could not verify uniqueness: {err}"));
                }
            }
        }
        Ok(())
    }

    /// Run the Submit transition, awaiting the create-and-upload job
    async fn submit_wizard(&mut self) -> Result<()> {
        let Some(wizard) = self.wizard.as_mut() else {
            return Ok(());
        };
        match wizard.request_submit() {
            SubmitRequest::Busy | SubmitRequest::Invalid => {}
            SubmitRequest::NotLastStep => {
                self.state.status_message =
                    Some("Complete the remaining steps before submitting".to_string());
            }
            SubmitRequest::Job(job) => {
                let result = job.run(&self.backend, &self.backend, &self.backend).await;
                match result {
                    Ok(outcome) => {
                        wizard.finish_submit(&job, true);
                        info!(id = outcome.record_id(), collection = job.collection, "submitted");
                        self.state.status_message = Some(submit_notice(job.collection, &outcome));
                        self.close_wizard();
                        self.refresh_establishments().await;
                    }
                    Err(err) => {
                        wizard.finish_submit(&job, false);
                        error!(error = %err, "submission failed");
                        self.state.push_error(format!("Submission failed: {err}"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Open the file-path prompt for the active upload field, pre-filled
    /// with the currently chosen path
    fn open_file_prompt(&mut self) {
        let Some(wizard) = self.wizard.as_ref() else {
            return;
        };
        let Some(field) = wizard.active_field() else {
            return;
        };
        if !field.is_file() {
            return;
        }
        let current = wizard
            .form
            .file(field)
            .as_pending()
            .map(|handle| handle.path.display().to_string())
            .unwrap_or_default();
        self.state.file_prompt = Some(current);
    }

    fn handle_file_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.file_prompt = None;
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.state.file_prompt.as_mut() {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = self.state.file_prompt.as_mut() {
                    buffer.push(c);
                }
            }
            KeyCode::Enter => {
                let Some(buffer) = self.state.file_prompt.take() else {
                    return;
                };
                let path = buffer.trim();
                if path.is_empty() {
                    return;
                }
                let Some(wizard) = self.wizard.as_mut() else {
                    return;
                };
                let Some(field) = wizard.active_field() else {
                    return;
                };
                match std::fs::metadata(path) {
                    Ok(meta) if meta.is_file() => {
                        wizard.form.attach_file(field, FileHandle::new(path, meta.len()));
                    }
                    Ok(_) => {
                        self.state.push_error(format!("{path} is not a file"));
                    }
                    Err(err) => {
                        self.state.push_error(format!("Could not read {path}: {err}"));
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_type_picker_key(&mut self, key: KeyEvent) {
        let Some(ty) = self.state.pending_application else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.state.pending_application = None;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.pending_application = Some(ty.next());
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.pending_application = Some(ty.prev());
            }
            KeyCode::Enter => {
                self.state.pending_application = None;
                self.open_application(ty);
            }
            _ => {}
        }
    }

    fn handle_discard_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.state.pending_discard.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                // Continue editing
                self.state.pending_discard = None;
            }
            KeyCode::Char('j') | KeyCode::Char('k') | KeyCode::Up | KeyCode::Down => {
                prompt.discard_selected = !prompt.discard_selected;
            }
            KeyCode::Enter => {
                let discard = prompt.discard_selected;
                self.state.pending_discard = None;
                if discard {
                    if let Some(wizard) = self.wizard.as_mut() {
                        wizard.confirm_discard();
                    }
                    self.close_wizard();
                }
            }
            _ => {}
        }
    }
}

/// Status-bar notice for a completed submission
fn submit_notice(collection: &str, outcome: &SubmitOutcome) -> String {
    let what = if collection == "establishments" {
        "Establishment registered and pending approval"
    } else {
        "Application submitted for review"
    };
    match outcome {
        SubmitOutcome::Created { id } => format!("{what} (ref {id})"),
        SubmitOutcome::CreatedWithWarnings { id, warnings } => {
            format!("{what} (ref {id}); {}", warnings.join("; "))
        }
    }
}
