//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A table intent a key press maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKey {
    Up,
    Down,
    PreviousPage,
    NextPage,
    AddRow,
    RowAction,
    Refetch,
}

/// Key binding configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Whether vim-style bindings are enabled.
    pub vim_mode: bool,
}

impl KeyBindings {
    pub fn new(vim_mode: bool) -> Self {
        Self { vim_mode }
    }

    /// Map a key press to a table intent.
    ///
    /// Arrow keys always work; `h`/`j`/`k`/`l` only in vim mode.
    pub fn table_key(&self, key: KeyEvent) -> Option<TableKey> {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(TableKey::Up),
            KeyCode::Down => Some(TableKey::Down),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('<') => Some(TableKey::PreviousPage),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('>') => Some(TableKey::NextPage),
            KeyCode::Char('k') if self.vim_mode => Some(TableKey::Up),
            KeyCode::Char('j') if self.vim_mode => Some(TableKey::Down),
            KeyCode::Char('h') if self.vim_mode => Some(TableKey::PreviousPage),
            KeyCode::Char('l') if self.vim_mode => Some(TableKey::NextPage),
            KeyCode::Char('a') => Some(TableKey::AddRow),
            KeyCode::Enter | KeyCode::Char('x') => Some(TableKey::RowAction),
            KeyCode::Char('r') => Some(TableKey::Refetch),
            _ => None,
        }
    }

    /// Hint line for the table view.
    pub fn table_hints(&self) -> &'static str {
        if self.vim_mode {
            "[j/k] rows  [h/l] page  [a] add  [Enter] action  [r] refetch  [1-4] demo  [?] help  [q] quit"
        } else {
            "[↑/↓] rows  [←/→] page  [a] add  [Enter] action  [r] refetch  [1-4] demo  [?] help  [q] quit"
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(true)
    }
}
