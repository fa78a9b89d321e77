//! Stroke definitions for connector lines.
//!
//! - [`StrokeDefinition`]: color, width and dash style of a stroked line
//! - [`StrokeStyle`]: solid or patterned strokes
//! - [`apply_stroke!`](crate::apply_stroke!): applies a definition to an SVG element
//!
//! | Rust Property | SVG Attribute | Example Values |
//! |--------------|---------------|----------------|
//! | `color` | `stroke`, `stroke-opacity` | `"#2D3748"`, `0.5` |
//! | `width` | `stroke-width` | `1.5` |
//! | `style` | `stroke-dasharray` | `"5,5"`, `"2,3"` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern of a stroke.
///
/// - `Solid`: no dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Custom(pattern)`: the provided dasharray
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// Custom SVG dasharray pattern, e.g. "10,5,2,5"
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ if !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, ',' | ' ' | '.')) =>
            {
                Ok(Self::Custom(s.to_string()))
            }
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted or a dasharray such as `4,2`"
            )),
        }
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering connector lines.
///
/// ```
/// use chartline_core::draw::{StrokeDefinition, StrokeStyle};
/// use chartline_core::color::Color;
///
/// let mut stroke = StrokeDefinition::new(Color::new("#2D3748").unwrap(), 1.5);
/// stroke.set_style(StrokeStyle::Dashed);
/// assert_eq!(stroke.width(), 1.5);
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// ```
/// use chartline_core::draw::StrokeDefinition;
/// use chartline_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
/// let line = svg_element::Line::new().set("x1", 0).set("y1", 0);
///
/// let line = chartline_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
