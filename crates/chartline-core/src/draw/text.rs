//! Text styling and the [`Text`] drawable.
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`Text`] - A single line of text anchored at a point
//!
//! Text is never measured against real font metrics. Captions are centered on
//! their anchor with `text-anchor`/`dominant-baseline`, so the host surface
//! does the actual fitting. [`Text::size`](crate::draw::Drawable::size) only
//! returns a rough estimate from the font size and character count.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl FromStr for TextAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "middle" => Ok(Self::Middle),
            "end" => Ok(Self::End),
            _ => Err(format!(
                "invalid text anchor `{s}`, valid values: start, middle, end"
            )),
        }
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_svg_value())
    }
}

/// Vertical alignment of text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Anchor is the alphabetic baseline (SVG default)
    Alphabetic,
    /// Anchor is the vertical middle of the glyphs
    #[default]
    Middle,
}

/// Visual style for text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Calibri, Arial, sans-serif"` |
/// | Font size | `11` |
/// | Font weight | `None` |
/// | Italic | `false` |
/// | Color | `None` (SVG default, black) |
/// | Anchor | [`TextAnchor::Middle`] |
/// | Baseline | [`Baseline::Middle`] |
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    font_weight: Option<String>,
    italic: bool,
    color: Option<Color>,
    anchor: TextAnchor,
    baseline: Baseline,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the CSS font weight, e.g. `"500"` or `"bold"`.
    pub fn set_font_weight(&mut self, weight: Option<&str>) {
        self.font_weight = weight.map(str::to_string);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = baseline;
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_weight(&self) -> Option<&str> {
        self.font_weight.as_deref()
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Builds the styled `<text>` element for `content` at `position`.
    pub(crate) fn to_svg(&self, content: &str, position: Point) -> svg_element::Text {
        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.anchor.to_svg_value())
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size);

        if self.baseline == Baseline::Middle {
            text = text.set("dominant-baseline", "middle");
        }
        if let Some(weight) = &self.font_weight {
            text = text.set("font-weight", weight.as_str());
        }
        if self.italic {
            text = text.set("font-style", "italic");
        }
        if let Some(color) = self.color {
            text = text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        text.add(SvgText::new(content))
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Calibri, Arial, sans-serif".to_string(),
            font_size: 11,
            font_weight: None,
            italic: false,
            color: None,
            anchor: TextAnchor::default(),
            baseline: Baseline::default(),
        }
    }
}

/// A single line of styled text.
///
/// ```
/// # use chartline_core::draw::{Drawable, Text, TextDefinition};
/// # use chartline_core::geometry::Point;
/// let style = TextDefinition::new();
/// let text = Text::new(&style, "Hold");
/// assert_eq!(text.content(), "Hold");
///
/// let output = text.render_to_layers(Point::new(470.0, 402.0));
/// assert!(!output.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }
}

impl Drawable for Text<'_> {
    /// `position` is the text anchor point, not the center of the estimated box.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(self.definition.to_svg(self.content, position)),
        );
        output
    }

    fn size(&self) -> Size {
        if self.content.is_empty() {
            return Size::default();
        }
        let font_size = f32::from(self.definition.font_size());
        let glyphs = self.content.chars().count() as f32;
        Size::new(glyphs * font_size * 0.55, font_size * 1.15)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_family(), "Calibri, Arial, sans-serif");
        assert_eq!(def.font_size(), 11);
        assert!(def.font_weight().is_none());
        assert!(!def.italic());
        assert!(def.color().is_none());
        assert_eq!(def.anchor(), TextAnchor::Middle);
        assert_eq!(def.baseline(), Baseline::Middle);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_family("Georgia, serif");
        def.set_font_size(14);
        def.set_font_weight(Some("bold"));
        def.set_italic(true);
        def.set_color(Some(Color::new("white").unwrap()));
        def.set_anchor(TextAnchor::Start);
        def.set_baseline(Baseline::Alphabetic);

        assert_eq!(def.font_family(), "Georgia, serif");
        assert_eq!(def.font_size(), 14);
        assert_eq!(def.font_weight(), Some("bold"));
        assert!(def.italic());
        assert!(def.color().is_some());
        assert_eq!(def.anchor(), TextAnchor::Start);
        assert_eq!(def.baseline(), Baseline::Alphabetic);
    }

    #[test]
    fn test_text_anchor_from_str() {
        assert_eq!("start".parse::<TextAnchor>().unwrap(), TextAnchor::Start);
        assert_eq!("middle".parse::<TextAnchor>().unwrap(), TextAnchor::Middle);
        assert_eq!("end".parse::<TextAnchor>().unwrap(), TextAnchor::End);
        assert!("left".parse::<TextAnchor>().is_err());
        assert_eq!(TextAnchor::End.to_string(), "end");
    }

    #[test]
    fn test_text_svg_attributes() {
        let mut def = TextDefinition::new();
        def.set_font_size(9);
        def.set_italic(true);

        let svg = def.to_svg("Shortlist", Point::new(290.0, 357.0)).to_string();
        assert!(svg.contains("x=\"290\""));
        assert!(svg.contains("y=\"357\""));
        assert!(svg.contains("font-size=\"9\""));
        assert!(svg.contains("font-style=\"italic\""));
        assert!(svg.contains("dominant-baseline=\"middle\""));
        assert!(svg.contains("Shortlist"));
    }

    #[test]
    fn test_text_alphabetic_baseline_omits_attribute() {
        let mut def = TextDefinition::new();
        def.set_baseline(Baseline::Alphabetic);
        let svg = def.to_svg("Hold", Point::new(470.0, 402.0)).to_string();
        assert!(!svg.contains("dominant-baseline"));
    }

    #[test]
    fn test_text_size_estimate() {
        let def = TextDefinition::new();
        assert!(Text::new(&def, "").size().is_zero());

        let short = Text::new(&def, "Hire").size();
        let long = Text::new(&def, "Request Interview").size();
        assert!(long.width() > short.width());
        assert_approx_eq!(f32, short.height(), long.height());
    }
}
