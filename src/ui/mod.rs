//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the table components and
//! the demo screens built from them.

pub mod components;
pub mod theme;
pub mod views;

pub use components::{render_hints, LoadingIndicator};
pub use theme::Theme;
pub use views::{Demo, DemoPage, HelpAction, HelpView, PageSettings};
