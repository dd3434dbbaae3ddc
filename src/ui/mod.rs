//! Terminal UI components
//!
//! Built with ratatui. Keyboard-first navigation throughout.

pub mod info;
pub mod panel;
pub mod screen;
pub mod theme;

pub use screen::render;
pub use theme::Theme;
