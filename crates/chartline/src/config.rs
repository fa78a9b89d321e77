//! Configuration types for Chartline rendering.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be loaded
//! from a TOML file. Every field is optional; unset values fall back to the
//! look of the built-in ATS workflow chart.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and arrow settings.
//! - [`StyleConfig`] - Canvas background, font family and drop shadows.
//! - [`ArrowConfig`] - Connector color, stroke width and style, head length and label size.
//!
//! # Example
//!
//! ```
//! # use chartline::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [style]
//!     background_color = "#FAFAFA"
//!     shadow = false
//!
//!     [arrow]
//!     head_length = 8.0
//!     style = "dashed"
//!     "##,
//! )
//! .unwrap();
//!
//! assert!(!config.style().shadow());
//! assert_eq!(config.arrow().head_length(), 8.0);
//! assert!(config.arrow().validate().is_ok());
//! ```

use serde::Deserialize;

use chartline_core::{
    color::Color,
    draw::{DEFAULT_HEAD_LENGTH, StrokeStyle},
};

const DEFAULT_FONT_FAMILY: &str = "Calibri, Arial, sans-serif";
const DEFAULT_ARROW_COLOR: &str = "#2D3748";
const DEFAULT_STROKE_WIDTH: f32 = 1.5;
const DEFAULT_LABEL_FONT_SIZE: u16 = 9;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Arrow configuration section.
    #[serde(default)]
    arrow: ArrowConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(style: StyleConfig, arrow: ArrowConfig) -> Self {
        Self { style, arrow }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the arrow configuration.
    pub fn arrow(&self) -> &ArrowConfig {
        &self.arrow
    }
}

/// Visual styling of the canvas and the text drawn on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Background [`Color`] of the canvas, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Font family used for box captions, labels and the legend.
    #[serde(default)]
    font_family: Option<String>,

    /// Whether boxes and panels get a drop shadow.
    #[serde(default = "default_shadow")]
    shadow: bool,
}

fn default_shadow() -> bool {
    true
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            font_family: None,
            shadow: default_shadow(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the configured font family or the default sans-serif stack.
    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }

    pub fn shadow(&self) -> bool {
        self.shadow
    }
}

/// Styling of connector arrows.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowConfig {
    #[serde(default)]
    color: Option<String>,

    #[serde(default)]
    stroke_width: Option<f32>,

    /// `solid`, `dashed`, `dotted` or an SVG dasharray.
    #[serde(default)]
    style: Option<String>,

    #[serde(default)]
    head_length: Option<f32>,

    #[serde(default)]
    label_font_size: Option<u16>,
}

impl ArrowConfig {
    /// Returns the parsed stroke and head [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn color(&self) -> Result<Color, String> {
        Color::new(self.color.as_deref().unwrap_or(DEFAULT_ARROW_COLOR))
            .map_err(|err| format!("Invalid arrow color in config: {err}"))
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH)
    }

    /// Returns the parsed line pattern, solid when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured style is not recognized.
    pub fn style(&self) -> Result<StrokeStyle, String> {
        self.style
            .as_deref()
            .map_or(Ok(StrokeStyle::Solid), str::parse)
            .map_err(|err| format!("Invalid arrow style in config: {err}"))
    }

    pub fn head_length(&self) -> f32 {
        self.head_length.unwrap_or(DEFAULT_HEAD_LENGTH)
    }

    pub fn label_font_size(&self) -> u16 {
        self.label_font_size.unwrap_or(DEFAULT_LABEL_FONT_SIZE)
    }

    /// Checks every arrow setting can be drawn.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting: an unparsable
    /// color or style, a non-positive stroke width or head length, or a
    /// zero label font size.
    pub fn validate(&self) -> Result<(), String> {
        self.color()?;
        self.style()?;

        for (name, value) in [
            ("stroke_width", self.stroke_width()),
            ("head_length", self.head_length()),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!(
                    "Invalid arrow {name} in config: must be positive, got {value}"
                ));
            }
        }

        if self.label_font_size() == 0 {
            return Err("Invalid arrow label_font_size in config: must be positive".to_string());
        }

        Ok(())
    }
}
