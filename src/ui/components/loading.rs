//! Loading indicators.
//!
//! A braille spinner used while a list query is pending and as the overlay
//! drawn over a table whose row action is in flight.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::components::modal::centered_rect;
use crate::ui::theme::Theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    spinner_state: usize,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self::with_message("Loading...")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Advance the spinner animation.
    ///
    /// This should be called on each tick event.
    pub fn tick(&mut self) {
        self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state % SPINNER_FRAMES.len()]
    }

    /// Formatted text for embedding in other widgets.
    pub fn text(&self) -> String {
        format!("{} {}", self.spinner_frame(), self.message)
    }

    /// Render the indicator centred in `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        let paragraph = Paragraph::new(self.text())
            .style(theme.text().fg(theme.accent))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, row);
    }

    /// Dim everything already drawn in `area` and put a boxed spinner on top.
    ///
    /// The content underneath stays visible so the user keeps their place.
    pub fn render_overlay(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        dim(frame.buffer_mut(), area);

        let width = (self.message.chars().count() as u16 + 6).min(area.width);
        let popup = centered_rect(width, 3, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        frame.render_widget(
            Paragraph::new(self.text())
                .style(theme.text().fg(theme.accent))
                .alignment(Alignment::Center),
            inner,
        );
    }
}

fn dim(buffer: &mut Buffer, area: Rect) {
    let area = area.intersection(buffer.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.modifier.insert(Modifier::DIM);
            }
        }
    }
}
