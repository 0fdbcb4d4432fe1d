//! Per-row action control.
//!
//! A row action forwards the row's bound variables to the owner, optionally
//! after a confirmation dialog. It never runs anything itself: the owner
//! issues the mutation and flips [`RowActionConfig::loading`] while it runs.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, text::Span, Frame};
use tracing::debug;

pub use crate::table::RowActionParams;
use crate::table::RowVariables;
use crate::ui::components::modal::{
    confirmation_input, render_confirmation, ConfirmationProps, DialogAction,
};
use crate::ui::theme::Theme;

/// Owner supplied configuration of the row action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionConfig {
    /// Button label drawn in the action column.
    pub label: String,
    /// Whether the owner has a request in flight.
    pub loading: bool,
    /// Ask before forwarding when set.
    pub confirmation: Option<ConfirmationProps>,
}

impl RowActionConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            loading: false,
            confirmation: None,
        }
    }

    pub fn with_confirmation(mut self, confirmation: ConfirmationProps) -> Self {
        self.confirmation = Some(confirmation);
        self
    }
}

/// Interaction state of the row action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowActionState {
    #[default]
    Idle,
    AwaitingConfirmation { variables: RowVariables },
}

/// The row action control shared by every row of a table.
#[derive(Debug, Clone)]
pub struct RowAction {
    config: RowActionConfig,
    state: RowActionState,
}

impl RowAction {
    pub fn new(config: RowActionConfig) -> Self {
        Self {
            config,
            state: RowActionState::Idle,
        }
    }

    pub fn config(&self) -> &RowActionConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.config.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.config.loading
    }

    pub fn state(&self) -> &RowActionState {
        &self.state
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self.state, RowActionState::AwaitingConfirmation { .. })
    }

    /// Activate the action for a row.
    ///
    /// Returns the variables to forward, or `None` when the row's control is
    /// hidden or disabled, a request is already in flight, or a confirmation
    /// dialog has been opened instead.
    pub fn activate(&mut self, params: &RowActionParams) -> Option<RowVariables> {
        if !params.show || params.disabled {
            return None;
        }
        if self.config.loading || self.is_confirming() {
            debug!("Row action ignored while busy");
            return None;
        }

        if self.config.confirmation.is_some() {
            debug!(variables = ?params.variables, "Row action awaiting confirmation");
            self.state = RowActionState::AwaitingConfirmation {
                variables: params.variables.clone(),
            };
            return None;
        }

        Some(params.variables.clone())
    }

    /// Accept the open confirmation and return the row's variables.
    pub fn confirm(&mut self) -> Option<RowVariables> {
        match std::mem::take(&mut self.state) {
            RowActionState::AwaitingConfirmation { variables } => Some(variables),
            RowActionState::Idle => None,
        }
    }

    /// Dismiss the open confirmation without forwarding anything.
    pub fn cancel(&mut self) {
        self.state = RowActionState::Idle;
    }

    /// Handle a key while the confirmation dialog is open.
    ///
    /// Returns the variables when the user confirmed.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<RowVariables> {
        if !self.is_confirming() {
            return None;
        }
        match confirmation_input(key)? {
            DialogAction::Confirm => self.confirm(),
            DialogAction::Cancel => {
                self.cancel();
                None
            }
        }
    }

    /// Cell content for a row's action column.
    pub fn cell(&self, params: &RowActionParams, theme: &Theme) -> Span<'static> {
        if !params.show {
            return Span::raw("");
        }
        let label = format!(" {} ", self.config.label);
        if params.disabled || self.config.loading {
            Span::styled(label, theme.button_disabled())
        } else {
            Span::styled(label, theme.button())
        }
    }

    /// Draw the confirmation dialog if one is open.
    pub fn render_dialog(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let (RowActionState::AwaitingConfirmation { .. }, Some(props)) =
            (&self.state, &self.config.confirmation)
        {
            render_confirmation(frame, area, props, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn params(id: &str) -> RowActionParams {
        RowActionParams::with_variables(RowVariables::from([("id".to_string(), id.to_string())]))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_activate_forwards_variables() {
        let mut action = RowAction::new(RowActionConfig::new("Delete"));
        let vars = action.activate(&params("a1")).unwrap();
        assert_eq!(vars.get("id").map(String::as_str), Some("a1"));
        assert_eq!(action.state(), &RowActionState::Idle);
    }

    #[test]
    fn test_disabled_row_does_nothing() {
        let mut action = RowAction::new(RowActionConfig::new("Delete"));
        let mut p = params("a1");
        p.disabled = true;
        assert!(action.activate(&p).is_none());
        assert!(action.activate(&RowActionParams::hidden()).is_none());
    }

    #[test]
    fn test_loading_blocks_activation() {
        let mut action = RowAction::new(RowActionConfig::new("Delete"));
        action.set_loading(true);
        assert!(action.activate(&params("a1")).is_none());
        action.set_loading(false);
        assert!(action.activate(&params("a1")).is_some());
    }

    #[test]
    fn test_confirmation_flow() {
        let config = RowActionConfig::new("Delete")
            .with_confirmation(ConfirmationProps::new("Delete credential?", "Delete"));
        let mut action = RowAction::new(config);

        assert!(action.activate(&params("b2")).is_none());
        assert!(action.is_confirming());

        // A second activation does not replace the pending row.
        assert!(action.activate(&params("c3")).is_none());

        let vars = action.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(vars.get("id").map(String::as_str), Some("b2"));
        assert!(!action.is_confirming());
    }

    #[test]
    fn test_confirmation_cancel() {
        let config = RowActionConfig::new("Delete")
            .with_confirmation(ConfirmationProps::new("Delete credential?", "Delete"));
        let mut action = RowAction::new(config);

        action.activate(&params("b2"));
        assert!(action.handle_input(key(KeyCode::Esc)).is_none());
        assert_eq!(action.state(), &RowActionState::Idle);
        assert!(action.confirm().is_none());
    }

    #[test]
    fn test_input_ignored_when_idle() {
        let mut action = RowAction::new(RowActionConfig::new("Delete"));
        assert!(action.handle_input(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_cell_styles() {
        let theme = Theme::default();
        let action = RowAction::new(RowActionConfig::new("Delete"));
        assert_eq!(action.cell(&params("a"), &theme).style, theme.button());
        assert_eq!(action.cell(&RowActionParams::hidden(), &theme).content, "");

        let mut disabled = params("a");
        disabled.disabled = true;
        assert_eq!(action.cell(&disabled, &theme).style, theme.button_disabled());
    }
}
