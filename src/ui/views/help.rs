//! Help panel listing keyboard shortcuts.
//!
//! Opened with `?` and closed with `?`, `q` or Escape. Long content scrolls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::events::KeyBindings;
use crate::ui::theme::Theme;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    Close,
}

type Section = (&'static str, Vec<(&'static str, &'static str)>);

fn sections(bindings: &KeyBindings) -> Vec<Section> {
    let (rows, pages) = if bindings.vim_mode {
        ("j/k ↑/↓", "h/l ←/→ < >")
    } else {
        ("↑/↓", "←/→ < >")
    };
    vec![
        (
            "Table",
            vec![
                (rows, "Select row"),
                (pages, "Previous / next page"),
                ("a", "Add row"),
                ("Enter/x", "Run row action"),
                ("r", "Re-fetch list"),
            ],
        ),
        (
            "Dialogs",
            vec![("Enter/y", "Confirm"), ("Esc/n", "Cancel"), ("Enter", "Dismiss notice")],
        ),
        (
            "Demos",
            vec![
                ("1-4", "Switch demo"),
                ("Tab", "Next demo"),
                ("?", "Toggle help"),
                ("q/Ctrl+C", "Quit"),
            ],
        ),
    ]
}

/// The help panel view.
pub struct HelpView {
    sections: Vec<Section>,
    scroll: usize,
    visible_height: usize,
}

impl HelpView {
    pub fn new(bindings: &KeyBindings) -> Self {
        Self {
            sections: sections(bindings),
            scroll: 0,
            visible_height: 0,
        }
    }

    fn total_lines(&self) -> usize {
        // Header and blank line per section, a trailing blank line, then the footer.
        self.sections
            .iter()
            .map(|(_, entries)| entries.len() + 3)
            .sum::<usize>()
            + 1
    }

    fn max_scroll(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_height)
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => Some(HelpAction::Close),

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }

            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }

            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }

            (KeyCode::Char('G'), _) => {
                self.scroll = self.max_scroll();
                None
            }

            // Consume all other input when help is open
            _ => None,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme.text().fg(theme.accent));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines(theme))
            .scroll((self.scroll as u16, 0))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, inner);

        if self.total_lines() > self.visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut scrollbar_state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }

    fn build_content_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        for (title, entries) in &self.sections {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", title),
                theme.header().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            for (key, description) in entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>14}", key), theme.key().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*description, theme.text()),
                ]));
            }

            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "?, q or Esc closes this panel",
            theme.muted(),
        )));

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new(&KeyBindings::default());
        for code in [KeyCode::Char('?'), KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(view.handle_input(key(code)), Some(HelpAction::Close));
        }
    }

    #[test]
    fn test_scroll_bounds() {
        let mut view = HelpView::new(&KeyBindings::default());
        view.visible_height = 5;
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(view.scroll, view.max_scroll());

        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('k')));
        }
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_line_count_matches_content() {
        let view = HelpView::new(&KeyBindings::default());
        let lines = view.build_content_lines(&Theme::default());
        assert_eq!(lines.len(), view.total_lines());
    }

    #[test]
    fn test_vim_mode_changes_row_keys() {
        let vim = HelpView::new(&KeyBindings::new(true));
        let plain = HelpView::new(&KeyBindings::new(false));
        assert_eq!(vim.sections[0].1[0].0, "j/k ↑/↓");
        assert_eq!(plain.sections[0].1[0].0, "↑/↓");
    }
}
