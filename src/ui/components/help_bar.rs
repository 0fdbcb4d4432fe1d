//! Key hint bar.
//!
//! Renders a single line of `[key] description` hints with the keys highlighted.

use ratatui::{layout::Rect, style::Style, text::Line, text::Span, widgets::Paragraph, Frame};

use crate::ui::theme::Theme;

/// Render a line of key hints.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &str, theme: &Theme) {
    let spans = parse_hints_to_spans(hints, theme.muted(), theme.key());
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Split hint text into spans, styling bracketed keys with `key_style`.
fn parse_hints_to_spans(hints: &str, text_style: Style, key_style: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), text_style));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(std::mem::take(&mut current), key_style));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, text_style));
    }

    spans
}
