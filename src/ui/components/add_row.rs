//! Add-row control.
//!
//! A button that validates the table's snapshot, optionally asks for
//! confirmation, and hands a mutation request to the owner. The owner runs
//! the mutation and reports back through [`AddRow::complete`].

use std::fmt;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::api::{Document, OperationRequest, Variables};
use crate::table::Snapshot;
use crate::ui::components::loading::LoadingIndicator;
use crate::ui::components::modal::{
    acknowledgment_input, confirmation_input, render_acknowledgment, render_confirmation,
    ConfirmationProps, DialogAction, SuccessProps,
};
use crate::ui::theme::Theme;
use crate::validation::Validate;

/// Owner supplied configuration of the add-row control.
pub struct AddRowConfig {
    pub button_text: String,
    pub mutation: Document,
    pub variables: Variables,
    /// Checked against the table's snapshot before anything is sent.
    pub validation: Option<Box<dyn Validate>>,
    pub confirmation: Option<ConfirmationProps>,
    /// Acknowledgment shown after a successful mutation.
    pub success: Option<SuccessProps>,
}

impl AddRowConfig {
    pub fn new(button_text: impl Into<String>, mutation: Document) -> Self {
        Self {
            button_text: button_text.into(),
            mutation,
            variables: Variables::new(),
            validation: None,
            confirmation: None,
            success: None,
        }
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_validation(mut self, validation: impl Validate + 'static) -> Self {
        self.validation = Some(Box::new(validation));
        self
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationProps) -> Self {
        self.confirmation = Some(confirmation);
        self
    }

    pub fn with_success(mut self, success: SuccessProps) -> Self {
        self.success = Some(success);
        self
    }
}

impl fmt::Debug for AddRowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddRowConfig")
            .field("button_text", &self.button_text)
            .field("mutation", &self.mutation.operation_name())
            .field("variables", &self.variables)
            .field("validation", &self.validation.is_some())
            .field("confirmation", &self.confirmation)
            .field("success", &self.success)
            .finish()
    }
}

/// Where the control is in its submit cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AddRowPhase {
    #[default]
    Idle,
    AwaitingConfirmation,
    Submitting,
    Acknowledging,
}

/// Visible state of the control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddRowState {
    /// Empty when there is nothing to show.
    pub error_message: String,
    pub phase: AddRowPhase,
}

#[derive(Debug)]
pub struct AddRow {
    config: AddRowConfig,
    state: AddRowState,
    spinner: LoadingIndicator,
}

impl AddRow {
    pub fn new(config: AddRowConfig) -> Self {
        Self {
            config,
            state: AddRowState::default(),
            spinner: LoadingIndicator::new(),
        }
    }

    pub fn config(&self) -> &AddRowConfig {
        &self.config
    }

    pub fn state(&self) -> &AddRowState {
        &self.state
    }

    pub fn phase(&self) -> AddRowPhase {
        self.state.phase
    }

    pub fn submitting(&self) -> bool {
        self.state.phase == AddRowPhase::Submitting
    }

    /// Whether a dialog owned by this control is open.
    pub fn has_dialog(&self) -> bool {
        matches!(
            self.state.phase,
            AddRowPhase::AwaitingConfirmation | AddRowPhase::Acknowledging
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        (!self.state.error_message.is_empty()).then_some(self.state.error_message.as_str())
    }

    pub fn clear_error(&mut self) {
        self.state.error_message.clear();
    }

    /// Press the button.
    ///
    /// Validation failures set the error message and send nothing. Returns
    /// the mutation to run when the control moved straight to `Submitting`.
    pub fn activate(&mut self, snapshot: &Snapshot) -> Option<OperationRequest> {
        if self.state.phase != AddRowPhase::Idle {
            debug!(phase = ?self.state.phase, "Add row ignored while busy");
            return None;
        }

        if let Some(schema) = &self.config.validation {
            if let Err(err) = schema.validate(snapshot) {
                debug!(field = %err.field, "Add row validation failed");
                self.state.error_message = err.to_string();
                return None;
            }
        }

        if self.config.confirmation.is_some() {
            self.state.phase = AddRowPhase::AwaitingConfirmation;
            return None;
        }

        Some(self.submit())
    }

    /// Accept the open confirmation.
    pub fn confirm(&mut self) -> Option<OperationRequest> {
        if self.state.phase != AddRowPhase::AwaitingConfirmation {
            return None;
        }
        Some(self.submit())
    }

    pub fn cancel(&mut self) {
        if self.state.phase == AddRowPhase::AwaitingConfirmation {
            self.state.phase = AddRowPhase::Idle;
        }
    }

    /// Report the outcome of the mutation returned by `activate`/`confirm`.
    pub fn complete(&mut self, result: Result<(), String>) {
        if self.state.phase != AddRowPhase::Submitting {
            debug!("Ignoring add row completion outside of a submit");
            return;
        }
        match result {
            Ok(()) => {
                self.state.error_message.clear();
                self.state.phase = if self.config.success.is_some() {
                    AddRowPhase::Acknowledging
                } else {
                    AddRowPhase::Idle
                };
            }
            Err(message) => {
                self.state.error_message = message;
                self.state.phase = AddRowPhase::Idle;
            }
        }
    }

    /// Close the success acknowledgment.
    pub fn dismiss(&mut self) {
        if self.state.phase == AddRowPhase::Acknowledging {
            self.state.phase = AddRowPhase::Idle;
        }
    }

    /// Handle a key while one of this control's dialogs is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<OperationRequest> {
        match self.state.phase {
            AddRowPhase::AwaitingConfirmation => match confirmation_input(key)? {
                DialogAction::Confirm => self.confirm(),
                DialogAction::Cancel => {
                    self.cancel();
                    None
                }
            },
            AddRowPhase::Acknowledging => {
                if acknowledgment_input(key).is_some() {
                    self.dismiss();
                }
                None
            }
            AddRowPhase::Idle | AddRowPhase::Submitting => None,
        }
    }

    pub fn tick(&mut self) {
        if self.submitting() {
            self.spinner.tick();
        }
    }

    fn submit(&mut self) -> OperationRequest {
        debug!(
            operation = self.config.mutation.operation_name(),
            "Add row submitting"
        );
        self.state.phase = AddRowPhase::Submitting;
        OperationRequest::new(self.config.mutation.clone(), self.config.variables.clone())
    }

    /// Draw the button line: button, progress and the inline error.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let button_style = if self.submitting() {
            theme.button_disabled()
        } else {
            theme.button()
        };
        let mut spans = vec![
            Span::styled(format!(" {} ", self.config.button_text), button_style),
            Span::styled(" [a]", theme.muted()),
        ];
        if self.submitting() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(self.spinner.text(), theme.muted()));
        }
        if let Some(error) = self.error_message() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!(" {} ", error), theme.error()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Draw the confirmation or acknowledgment dialog when open.
    pub fn render_dialog(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self.state.phase {
            AddRowPhase::AwaitingConfirmation => {
                if let Some(props) = &self.config.confirmation {
                    render_confirmation(frame, area, props, theme);
                }
            }
            AddRowPhase::Acknowledging => {
                if let Some(props) = &self.config.success {
                    render_acknowledgment(frame, area, props, theme);
                }
            }
            AddRowPhase::Idle | AddRowPhase::Submitting => {}
        }
    }
}
