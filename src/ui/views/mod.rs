//! Application views (screens).

pub mod credentials;
pub mod demo;
mod help;

pub use demo::{Demo, DemoPage, PageSettings};
pub use help::{HelpAction, HelpView};
