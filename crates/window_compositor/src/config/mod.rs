//! Configuration system

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Format is chosen by extension
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Height in pixels of the title-bar strip
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 24;

/// Stroke width of the close glyph
pub const DEFAULT_CLOSE_GLYPH_STROKE_WIDTH: f32 = 5.0;

/// Compositor-wide settings shared by every window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorSettings {
    /// Title-bar height added to a window's configured size
    pub title_bar_height: i32,

    /// Stroke width of the close "X"
    pub close_glyph_stroke_width: f32,

    /// Anti-alias the close glyph triangles
    pub anti_alias_glyph: bool,
}

impl Default for CompositorSettings {
    fn default() -> Self {
        Self {
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
            close_glyph_stroke_width: DEFAULT_CLOSE_GLYPH_STROKE_WIDTH,
            anti_alias_glyph: true,
        }
    }
}

impl Config for CompositorSettings {}

impl CompositorSettings {
    /// Half of the title-bar height, the close glyph's extent
    pub const fn half_title_bar(&self) -> i32 {
        self.title_bar_height / 2
    }

    /// Quarter of the title-bar height, the close glyph's inset
    pub const fn quarter_title_bar(&self) -> i32 {
        self.title_bar_height / 4
    }
}
