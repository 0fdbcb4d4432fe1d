//! Theme and styling configuration.
//!
//! Themes are static tables; nothing here is mutated at runtime.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the table and its controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Secondary text (hints, disabled controls).
    pub muted: Color,
    /// Container and rule lines.
    pub border: Color,
    /// Highlight color for the selected row and active keys.
    pub accent: Color,
    /// Primary button text.
    pub button_fg: Color,
    /// Primary button fill.
    pub button_bg: Color,
    /// Inline error text.
    pub error_fg: Color,
    /// Inline error fill.
    pub error_bg: Color,
    /// Fill of every other body row.
    pub stripe_bg: Color,
    /// Success acknowledgment accent.
    pub success: Color,
}

/// Default theme for dark terminals.
pub const DARK: Theme = Theme {
    fg: Color::White,
    muted: Color::DarkGray,
    border: Color::Gray,
    accent: Color::Cyan,
    button_fg: Color::Rgb(0xf8, 0xf9, 0xfa),
    button_bg: Color::Rgb(0x34, 0x3a, 0x40),
    error_fg: Color::Rgb(0xff, 0x87, 0x87),
    error_bg: Color::Rgb(0x5c, 0x1a, 0x1a),
    stripe_bg: Color::Rgb(0x21, 0x25, 0x29),
    success: Color::Green,
};

/// Light theme using the component's original palette.
pub const LIGHT: Theme = Theme {
    fg: Color::Rgb(0x21, 0x25, 0x29),
    muted: Color::Rgb(0x86, 0x8e, 0x96),
    border: Color::Rgb(0xde, 0xe2, 0xe6),
    accent: Color::Rgb(0x19, 0x71, 0xc2),
    button_fg: Color::Rgb(0xf8, 0xf9, 0xfa),
    button_bg: Color::Rgb(0x34, 0x3a, 0x40),
    error_fg: Color::Rgb(0xc9, 0x2a, 0x2a),
    error_bg: Color::Rgb(0xff, 0xe3, 0xe3),
    stripe_bg: Color::Rgb(0xf1, 0xf3, 0xf5),
    success: Color::Rgb(0x2b, 0x8a, 0x3e),
};

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}

impl Theme {
    /// Look up a theme by its configured name; unknown names fall back to dark.
    pub fn by_name(name: &str) -> &'static Theme {
        match name.to_ascii_lowercase().as_str() {
            "light" => &LIGHT,
            _ => &DARK,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        Style::default().fg(self.button_fg).bg(self.button_bg)
    }

    pub fn button_disabled(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error_fg).bg(self.error_bg)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn key(&self) -> Style {
        Style::default().fg(self.accent)
    }
}
