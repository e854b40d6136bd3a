//! Per-window configuration

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::Color;
use crate::config::Config;
use crate::foundation::math::V2i;

bitflags! {
    /// Behavior switches for a window
    ///
    /// Only `HAS_TITLE_BAR` and `CLOSABLE` affect compositing; the rest are
    /// stored for hosts that implement movement, resizing and placement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct WindowFlags: u32 {
        /// Draw a close glyph in the title bar
        const CLOSABLE      = 1 << 0;
        /// Center on the host surface
        const AUTO_CENTERED = 1 << 1;
        /// No border
        const BORDERLESS    = 1 << 2;
        /// May be dragged
        const MOVABLE       = 1 << 3;
        /// Keep the cached surface while closed
        const CACHE_PERSIST = 1 << 4;
        /// May be resized
        const RESIZABLE     = 1 << 5;
        /// Remember position across reopen
        const KEEP_POSITION = 1 << 6;
        /// Reserve and draw a title bar
        const HAS_TITLE_BAR = 1 << 7;
    }
}

/// Caller-supplied window configuration, replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title text
    pub title: String,

    /// Initial top-left position
    pub start_position: V2i,

    /// Initial content size, excluding the title bar
    pub start_size: V2i,

    /// Behavior flags
    pub flags: WindowFlags,

    /// Title text color
    pub title_color: Color,

    /// Title-bar background
    pub title_bg_color: Color,

    /// Close glyph color
    pub title_button_color: Color,

    /// Window background
    pub bg_color: Color,

    /// Border color
    pub border_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Window".to_string(),
            start_position: V2i::zeros(),
            start_size: V2i::zeros(),
            flags: WindowFlags::HAS_TITLE_BAR
                | WindowFlags::CLOSABLE
                | WindowFlags::MOVABLE
                | WindowFlags::RESIZABLE,
            title_color: Color::WHITE,
            title_bg_color: Color::rgb(32, 32, 32),
            title_button_color: Color::WHITE,
            bg_color: Color::rgb(16, 16, 16),
            border_color: Color::TRANSPARENT,
        }
    }
}

impl Config for WindowConfig {}

impl WindowConfig {
    /// Default configuration at a given position and content size
    pub fn new(title: impl Into<String>, start_position: V2i, start_size: V2i) -> Self {
        Self {
            title: title.into(),
            start_position,
            start_size,
            ..Self::default()
        }
    }

    /// Set or clear a flag, builder style
    #[must_use]
    pub fn with_flag(mut self, flag: WindowFlags, enabled: bool) -> Self {
        self.flags.set(flag, enabled);
        self
    }

    /// Whether the window reserves and draws a title bar
    pub const fn has_title_bar(&self) -> bool {
        self.flags.contains(WindowFlags::HAS_TITLE_BAR)
    }

    /// Whether the title bar carries a close glyph
    pub const fn closable(&self) -> bool {
        self.flags.contains(WindowFlags::CLOSABLE)
    }

    /// Full window size: content plus the title bar when present
    ///
    /// Saturates at `i32::MAX` so oversized requests reach the backend's
    /// size check.
    pub fn window_size(&self, title_bar_height: i32) -> V2i {
        let mut size = self.start_size;
        if self.has_title_bar() {
            size.y = size.y.saturating_add(title_bar_height);
        }
        size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "Window");
        assert!(config.has_title_bar());
        assert!(config.closable());
        assert!(config.flags.contains(WindowFlags::MOVABLE | WindowFlags::RESIZABLE));
        assert!(!config.flags.contains(WindowFlags::BORDERLESS));
        assert_eq!(config.bg_color, Color::rgb(16, 16, 16));
        assert_eq!(config.title_bg_color, Color::rgb(32, 32, 32));
    }

    #[test]
    fn test_window_size_includes_title_bar() {
        let config = WindowConfig::new("a", V2i::zeros(), V2i::new(100, 50));
        assert_eq!(config.window_size(24), V2i::new(100, 74));

        let bare = config.with_flag(WindowFlags::HAS_TITLE_BAR, false);
        assert_eq!(bare.window_size(24), V2i::new(100, 50));
    }

    #[test]
    fn test_config_from_toml() {
        let text = r#"
            title = "Settings"
            start_size = [300, 200]
            flags = "HAS_TITLE_BAR | MOVABLE"
        "#;
        let config: WindowConfig = toml::from_str(text).unwrap();
        assert_eq!(config.title, "Settings");
        assert_eq!(config.start_size, V2i::new(300, 200));
        assert_eq!(config.start_position, V2i::zeros());
        assert!(config.has_title_bar());
        assert!(!config.closable());
        assert_eq!(config.bg_color, Color::rgb(16, 16, 16));
    }

    #[test]
    fn test_window_size_saturates() {
        let config = WindowConfig::new("tall", V2i::zeros(), V2i::new(10, i32::MAX - 4));
        assert_eq!(config.window_size(24), V2i::new(10, i32::MAX));
        assert_eq!(config.window_size(4), V2i::new(10, i32::MAX));

        let bare = config.with_flag(WindowFlags::HAS_TITLE_BAR, false);
        assert_eq!(bare.window_size(24), V2i::new(10, i32::MAX - 4));
    }
}
