//! Opening-crawl theme for starcatalog
//!
//! Color palette and style helpers for the TUI: crawl yellow on deep space,
//! with saber blue for focus and imperial red for warnings.

use ratatui::style::{Color, Modifier, Style};

/// Color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #05060a (deep space)
    pub const BACKGROUND: Color = Color::Rgb(0x05, 0x06, 0x0a);

    /// Primary: #ffe81f (crawl yellow)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xe8, 0x1f);

    /// Secondary: #4fa3ff (saber blue)
    pub const SECONDARY: Color = Color::Rgb(0x4f, 0xa3, 0xff);

    /// Accent: #7cff6b (saber green)
    pub const ACCENT: Color = Color::Rgb(0x7c, 0xff, 0x6b);

    /// Text: #dcdcdc (hull grey)
    pub const TEXT: Color = Color::Rgb(0xdc, 0xdc, 0xdc);

    /// Dim: #5a5e6b (muted)
    pub const DIM: Color = Color::Rgb(0x5a, 0x5e, 0x6b);

    /// Warning: #ff3b30 (imperial red)
    pub const WARNING: Color = Color::Rgb(0xff, 0x3b, 0x30);

    /// Panel background
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x11, 0x13, 0x1c);

    /// Border color (dim yellow)
    pub const BORDER: Color = Color::Rgb(0x80, 0x74, 0x10);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::SECONDARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor of the focused column
    pub fn cursor() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Row that is the active selection (selected film, active starship)
    pub fn active() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Episode badge in the film list
    pub fn episode() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Opening crawl text
    pub fn crawl() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }
}
