//! Filled boxes with centered captions, and multi-line panels.
//!
//! - [`BoxDefinition`] / [`LabeledBox`]: a rounded rectangle with one or more
//!   caption lines stacked around its vertical center.
//! - [`PanelDefinition`] / [`Panel`]: a larger block with a title and body lines
//!   at fixed offsets from its top edge.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, TextDefinition},
    geometry::{Point, Size},
};

/// Gap between stacked caption lines, added to the font size.
const CAPTION_LINE_GAP: f32 = 2.0;

/// Builds the rounded, filled background rectangle shared by boxes and panels.
fn filled_rect(
    position: Point,
    size: Size,
    fill: Color,
    corner_radius: f32,
    shadow: Option<&str>,
) -> svg_element::Rectangle {
    let bounds = position.to_bounds(size);
    let mut rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", size.width())
        .set("height", size.height())
        .set("fill", fill.to_string())
        .set("fill-opacity", fill.alpha())
        .set("rx", corner_radius)
        .set("ry", corner_radius);

    if let Some(filter_id) = shadow {
        rect = rect.set("filter", format!("url(#{filter_id})"));
    }
    rect
}

/// Style of a [`LabeledBox`].
#[derive(Debug, Clone)]
pub struct BoxDefinition {
    fill: Color,
    corner_radius: f32,
    shadow: Option<String>,
    text: Rc<TextDefinition>,
}

impl BoxDefinition {
    /// Creates a box style with a 4 unit corner radius and no shadow.
    pub fn new(fill: Color, text: Rc<TextDefinition>) -> Self {
        Self {
            fill,
            corner_radius: 4.0,
            shadow: None,
            text,
        }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn text(&self) -> &Rc<TextDefinition> {
        &self.text
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }

    /// Sets the id of an SVG filter applied to the rectangle.
    pub fn set_shadow(&mut self, filter_id: Option<&str>) {
        self.shadow = filter_id.map(str::to_string);
    }

    pub fn set_text(&mut self, text: Rc<TextDefinition>) {
        self.text = text;
    }
}

/// A filled box with stacked caption lines.
///
/// Line `i` of `n` is drawn at `center_y + (i - (n - 1) / 2) * (font_size + 2)`,
/// so a single line sits exactly on the center.
///
/// ```
/// # use std::rc::Rc;
/// # use chartline_core::color::Color;
/// # use chartline_core::draw::{BoxDefinition, Drawable, LabeledBox, TextDefinition};
/// # use chartline_core::geometry::{Point, Size};
/// let style = BoxDefinition::new(Color::new("#2B4B8C").unwrap(), Rc::new(TextDefinition::new()));
/// let node = LabeledBox::new(&style, Size::new(140.0, 45.0), vec!["Job Posted", "by Recruiter"]);
///
/// let ys = node.line_positions(Point::new(450.0, 42.5));
/// assert_eq!(ys.len(), 2);
/// assert_eq!(ys[0].y(), 36.0);
/// assert_eq!(ys[1].y(), 49.0);
/// ```
#[derive(Debug, Clone)]
pub struct LabeledBox<'a> {
    definition: &'a BoxDefinition,
    size: Size,
    lines: Vec<&'a str>,
}

impl<'a> LabeledBox<'a> {
    pub fn new(definition: &'a BoxDefinition, size: Size, lines: Vec<&'a str>) -> Self {
        Self {
            definition,
            size,
            lines,
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Anchor points of each caption line for a box centered at `center`.
    pub fn line_positions(&self, center: Point) -> Vec<Point> {
        let step = f32::from(self.definition.text().font_size()) + CAPTION_LINE_GAP;
        let middle = (self.lines.len() as f32 - 1.0) / 2.0;
        (0..self.lines.len())
            .map(|i| Point::new(center.x(), center.y() + (i as f32 - middle) * step))
            .collect()
    }
}

impl Drawable for LabeledBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;

        let rect = filled_rect(
            position,
            self.size,
            definition.fill(),
            definition.corner_radius(),
            definition.shadow.as_deref(),
        );
        output.add_to_layer(RenderLayer::Content, Box::new(rect));

        for (line, anchor) in self.lines.iter().zip(self.line_positions(position)) {
            let text = definition.text().to_svg(line, anchor);
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}

/// Style of a [`Panel`].
#[derive(Debug, Clone)]
pub struct PanelDefinition {
    fill: Color,
    corner_radius: f32,
    shadow: Option<String>,
    title_text: Rc<TextDefinition>,
    body_text: Rc<TextDefinition>,
    title_offset: f32,
    body_offset: f32,
    body_line_height: f32,
}

impl PanelDefinition {
    /// Creates a panel style: title 30 units below the top edge, body lines
    /// from 60 units down, 15 units apart.
    pub fn new(fill: Color, title_text: Rc<TextDefinition>, body_text: Rc<TextDefinition>) -> Self {
        Self {
            fill,
            corner_radius: 6.0,
            shadow: None,
            title_text,
            body_text,
            title_offset: 30.0,
            body_offset: 60.0,
            body_line_height: 15.0,
        }
    }

    pub fn set_shadow(&mut self, filter_id: Option<&str>) {
        self.shadow = filter_id.map(str::to_string);
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius;
    }
}

/// A titled block of body text.
#[derive(Debug, Clone)]
pub struct Panel<'a> {
    definition: &'a PanelDefinition,
    size: Size,
    title: &'a str,
    body: Vec<&'a str>,
}

impl<'a> Panel<'a> {
    pub fn new(definition: &'a PanelDefinition, size: Size, title: &'a str, body: Vec<&'a str>) -> Self {
        Self {
            definition,
            size,
            title,
            body,
        }
    }
}

impl Drawable for Panel<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;
        let top = position.to_bounds(self.size).min_y();

        let rect = filled_rect(
            position,
            self.size,
            definition.fill,
            definition.corner_radius,
            definition.shadow.as_deref(),
        );
        output.add_to_layer(RenderLayer::Content, Box::new(rect));

        let title_anchor = Point::new(position.x(), top + definition.title_offset);
        output.add_to_layer(
            RenderLayer::Text,
            Box::new(definition.title_text.to_svg(self.title, title_anchor)),
        );

        for (i, line) in self.body.iter().enumerate() {
            let y = top + definition.body_offset + i as f32 * definition.body_line_height;
            let text = definition
                .body_text
                .to_svg(line, Point::new(position.x(), y));
            output.add_to_layer(RenderLayer::Text, Box::new(text));
        }

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
