//! Event handling for the application.
//!
//! Terminal input is polled into [`Event`]s; key presses are mapped to table
//! intents through [`KeyBindings`].

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{KeyBindings, TableKey};

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
