//! Modal dialogs: the confirmation step before a mutation and the success
//! acknowledgment after one.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::theme::Theme;

/// Result of a key press inside a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
}

/// Configuration of a confirmation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationProps {
    pub title: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Optional body text.
    pub content: Option<String>,
}

impl ConfirmationProps {
    pub fn new(title: impl Into<String>, confirm_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            confirm_text: confirm_text.into(),
            cancel_text: "Cancel".to_string(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_cancel_text(mut self, cancel_text: impl Into<String>) -> Self {
        self.cancel_text = cancel_text.into();
        self
    }
}

/// Configuration of the acknowledgment shown after a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessProps {
    pub title: String,
    pub message: String,
    pub button_text: String,
}

impl SuccessProps {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            button_text: "OK".to_string(),
        }
    }
}

/// Map a key press in a confirmation dialog.
///
/// `Enter`/`y` confirm, `Esc`/`n`/`q` cancel, everything else is swallowed.
pub fn confirmation_input(key: KeyEvent) -> Option<DialogAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Char('y'), KeyModifiers::NONE) => {
            Some(DialogAction::Confirm)
        }
        (KeyCode::Esc, _)
        | (KeyCode::Char('n'), KeyModifiers::NONE)
        | (KeyCode::Char('q'), KeyModifiers::NONE) => Some(DialogAction::Cancel),
        _ => None,
    }
}

/// Map a key press in an acknowledgment dialog; any of `Enter`/`Esc`/`q` dismisses.
pub fn acknowledgment_input(key: KeyEvent) -> Option<DialogAction> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(DialogAction::Confirm),
        _ => None,
    }
}

/// Draw a confirmation dialog centred in `area`.
pub fn render_confirmation(frame: &mut Frame, area: Rect, props: &ConfirmationProps, theme: &Theme) {
    let buttons = Line::from(vec![
        Span::styled(format!(" {} ", props.confirm_text), theme.button()),
        Span::styled(" [Enter/y]", theme.muted()),
        Span::raw("   "),
        Span::styled(format!(" {} ", props.cancel_text), theme.text()),
        Span::styled(" [Esc/n]", theme.muted()),
    ]);
    render_dialog(
        frame,
        area,
        &props.title,
        props.content.as_deref(),
        buttons,
        Style::default().fg(theme.accent),
        theme,
    );
}

/// Draw an acknowledgment dialog centred in `area`.
pub fn render_acknowledgment(frame: &mut Frame, area: Rect, props: &SuccessProps, theme: &Theme) {
    let buttons = Line::from(vec![
        Span::styled(format!(" {} ", props.button_text), theme.button()),
        Span::styled(" [Enter]", theme.muted()),
    ]);
    render_dialog(
        frame,
        area,
        &props.title,
        Some(&props.message),
        buttons,
        Style::default().fg(theme.success),
        theme,
    );
}

fn render_dialog(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    content: Option<&str>,
    buttons: Line<'_>,
    border_style: Style,
    theme: &Theme,
) {
    let dialog_width = 56.min(area.width.saturating_sub(4));
    let dialog_height = if content.is_some() { 9 } else { 6 }.min(area.height);
    let dialog_area = centered_rect(dialog_width, dialog_height, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            border_style.add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    if let Some(content) = content {
        let body = Paragraph::new(content)
            .style(theme.text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, chunks[0]);
    }

    frame.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[1],
    );
}

/// Create a centered rectangle.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(draw: impl FnOnce(&mut Frame)) -> String {
        let backend = TestBackend::new(70, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(draw).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_confirmation_keys() {
        assert_eq!(confirmation_input(key(KeyCode::Enter)), Some(DialogAction::Confirm));
        assert_eq!(confirmation_input(key(KeyCode::Char('y'))), Some(DialogAction::Confirm));
        assert_eq!(confirmation_input(key(KeyCode::Esc)), Some(DialogAction::Cancel));
        assert_eq!(confirmation_input(key(KeyCode::Char('n'))), Some(DialogAction::Cancel));
        assert_eq!(confirmation_input(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_acknowledgment_keys() {
        assert_eq!(acknowledgment_input(key(KeyCode::Enter)), Some(DialogAction::Confirm));
        assert_eq!(acknowledgment_input(key(KeyCode::Esc)), Some(DialogAction::Confirm));
        assert_eq!(acknowledgment_input(key(KeyCode::Char('j'))), None);
    }

    #[test]
    fn test_render_confirmation() {
        let props = ConfirmationProps::new("Delete credential?", "Delete")
            .with_content("This cannot be undone.");
        let text = screen(|f| render_confirmation(f, f.area(), &props, &Theme::default()));
        assert!(text.contains("Delete credential?"));
        assert!(text.contains("This cannot be undone."));
        assert!(text.contains("Cancel"));
    }

    #[test]
    fn test_render_acknowledgment() {
        let props = SuccessProps::new("Done", "Credential generated");
        let text = screen(|f| render_acknowledgment(f, f.area(), &props, &Theme::default()));
        assert!(text.contains("Credential generated"));
        assert!(text.contains("OK"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect, Rect::new(30, 20, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(40, 10, area);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}
