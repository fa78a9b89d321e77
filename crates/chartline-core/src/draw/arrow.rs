//! Straight and elbow connector arrows.
//!
//! Both renderers are pure functions from points to [`DrawingPrimitives`]:
//!
//! - [`render_straight_arrow`] draws a segment whose end is pulled back by the
//!   arrowhead length so the stroke does not poke through the tip, a filled
//!   triangular head, and an optional label near the midpoint.
//! - [`render_elbow_arrow`] draws a polyline through an [`ElbowPath`] and orients
//!   the head along the final leg only. Its label is placed by the caller.
//!
//! The arrowhead is an isosceles triangle: the tip sits on the target and the
//! two base corners are `head_length` away from it, rotated ±30° off the
//! reverse direction.
//!
//! ```
//! # use chartline_core::draw::{render_straight_arrow, LabelPlacement};
//! # use chartline_core::geometry::Point;
//! let arrow = render_straight_arrow(
//!     Point::new(450.0, 65.0),
//!     Point::new(450.0, 85.0),
//!     None,
//!     LabelPlacement::Inline,
//! );
//! let body = arrow.body().unwrap();
//! assert!((body[1].y() - 79.0).abs() < 1e-4);
//! ```

use std::{f32::consts::FRAC_PI_6, rc::Rc, str::FromStr};

use log::trace;
use serde::Deserialize;
use svg::node::element as svg_element;
use thiserror::Error;

use crate::{
    color::Color,
    draw::{
        DrawingPrimitives, LayeredOutput, Primitive, RenderLayer, StrokeDefinition,
        TextDefinition, path_data, points_attribute,
    },
    geometry::Point,
};

/// Default distance from arrowhead tip to its base corners.
pub const DEFAULT_HEAD_LENGTH: f32 = 6.0;

/// Half of the arrowhead's opening angle.
const HEAD_HALF_ANGLE: f32 = FRAC_PI_6;

/// Vertical lift of an `Above` label off the segment midpoint.
const LABEL_ABOVE_OFFSET: f32 = 8.0;

/// Horizontal nudge of an `Inline` label off the segment midpoint.
const LABEL_INLINE_OFFSET: f32 = 5.0;

/// Errors raised while building arrow geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrowError {
    #[error("elbow arrow needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// Where a straight arrow's label sits relative to the segment midpoint.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPlacement {
    /// Shifted right of the midpoint
    #[default]
    Inline,
    /// Lifted above the midpoint
    Above,
}

impl LabelPlacement {
    fn offset(self) -> Point {
        match self {
            Self::Inline => Point::new(LABEL_INLINE_OFFSET, 0.0),
            Self::Above => Point::new(0.0, -LABEL_ABOVE_OFFSET),
        }
    }
}

impl FromStr for LabelPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inline" => Ok(Self::Inline),
            "above" => Ok(Self::Above),
            _ => Err(format!(
                "invalid label placement `{s}`, valid values: inline, above"
            )),
        }
    }
}

/// Triangular arrowhead geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    tip: Point,
    left: Point,
    right: Point,
    angle: f32,
}

impl Arrowhead {
    /// Builds a head whose tip is at `tip`, pointing along `angle`.
    pub fn new(tip: Point, angle: f32, length: f32) -> Self {
        Self {
            tip,
            left: tip.offset_polar(angle - HEAD_HALF_ANGLE, -length),
            right: tip.offset_polar(angle + HEAD_HALF_ANGLE, -length),
            angle,
        }
    }

    pub fn tip(&self) -> Point {
        self.tip
    }

    /// Direction the head points at, in radians.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Tip followed by the two base corners.
    pub fn vertices(&self) -> [Point; 3] {
        [self.tip, self.left, self.right]
    }
}

/// An ordered path of at least two points.
///
/// ```
/// # use chartline_core::draw::ElbowPath;
/// # use chartline_core::geometry::Point;
/// assert!(ElbowPath::new(vec![Point::new(0.0, 0.0)]).is_err());
///
/// let path = ElbowPath::new(vec![
///     Point::new(380.0, 367.0),
///     Point::new(200.0, 367.0),
///     Point::new(200.0, 410.0),
/// ])
/// .unwrap();
/// assert_eq!(path.points().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElbowPath {
    points: Vec<Point>,
}

impl ElbowPath {
    pub fn new(points: Vec<Point>) -> Result<Self, ArrowError> {
        if points.len() < 2 {
            return Err(ArrowError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The last two points, which orient the arrowhead.
    pub fn last_leg(&self) -> (Point, Point) {
        let n = self.points.len();
        (self.points[n - 2], self.points[n - 1])
    }
}

impl TryFrom<Vec<Point>> for ElbowPath {
    type Error = ArrowError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

/// Label text for an elbow arrow together with its explicit anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct ElbowLabel {
    text: String,
    anchor: Point,
}

impl ElbowLabel {
    pub fn new(text: impl Into<String>, anchor: Point) -> Self {
        Self {
            text: text.into(),
            anchor,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }
}

/// Straight arrow primitives with the default head length.
pub fn render_straight_arrow(
    source: Point,
    target: Point,
    label: Option<&str>,
    placement: LabelPlacement,
) -> DrawingPrimitives {
    straight_primitives(source, target, label, placement, DEFAULT_HEAD_LENGTH)
}

/// Elbow arrow primitives with the default head length.
pub fn render_elbow_arrow(path: &ElbowPath, label: Option<&ElbowLabel>) -> DrawingPrimitives {
    elbow_primitives(path, label, DEFAULT_HEAD_LENGTH)
}

fn straight_primitives(
    source: Point,
    target: Point,
    label: Option<&str>,
    placement: LabelPlacement,
    head_length: f32,
) -> DrawingPrimitives {
    let angle = source.angle_to(target);
    let head = Arrowhead::new(target, angle, head_length);

    let mut primitives = DrawingPrimitives::new();
    primitives.push(Primitive::Line {
        start: source,
        end: target.offset_polar(angle, -head_length),
    });
    primitives.push(Primitive::Polygon(head.vertices().to_vec()));

    if let Some(text) = label {
        primitives.push(Primitive::Text {
            position: source.midpoint(target).add_point(placement.offset()),
            content: text.to_string(),
        });
    }

    primitives
}

fn elbow_primitives(
    path: &ElbowPath,
    label: Option<&ElbowLabel>,
    head_length: f32,
) -> DrawingPrimitives {
    let (before_last, last) = path.last_leg();
    let angle = before_last.angle_to(last);
    let head = Arrowhead::new(last, angle, head_length);

    let mut body = path.points().to_vec();
    if let Some(end) = body.last_mut() {
        *end = last.offset_polar(angle, -head_length);
    }

    let mut primitives = DrawingPrimitives::new();
    primitives.push(Primitive::Polyline(body));
    primitives.push(Primitive::Polygon(head.vertices().to_vec()));

    if let Some(label) = label {
        primitives.push(Primitive::Text {
            position: label.anchor(),
            content: label.text().to_string(),
        });
    }

    primitives
}

/// Visual properties shared by arrows.
#[derive(Debug, Clone)]
pub struct ArrowDefinition {
    stroke: Rc<StrokeDefinition>,
    head_length: f32,
    text: Rc<TextDefinition>,
}

impl ArrowDefinition {
    pub fn new(stroke: Rc<StrokeDefinition>, text: Rc<TextDefinition>) -> Self {
        Self {
            stroke,
            head_length: DEFAULT_HEAD_LENGTH,
            text,
        }
    }

    pub fn stroke(&self) -> &Rc<StrokeDefinition> {
        &self.stroke
    }

    pub fn head_length(&self) -> f32 {
        self.head_length
    }

    pub fn text(&self) -> &Rc<TextDefinition> {
        &self.text
    }

    pub fn set_head_length(&mut self, head_length: f32) {
        self.head_length = head_length;
    }

    pub fn set_stroke(&mut self, stroke: Rc<StrokeDefinition>) {
        self.stroke = stroke;
    }

    pub fn set_text(&mut self, text: Rc<TextDefinition>) {
        self.text = text;
    }
}

impl Default for ArrowDefinition {
    fn default() -> Self {
        let color = Color::new("#2D3748").expect("'#2D3748' is a valid CSS color");

        let mut text = TextDefinition::new();
        text.set_font_size(9);
        text.set_italic(true);
        text.set_color(Some(color));

        Self::new(
            Rc::new(StrokeDefinition::new(color, 1.5)),
            Rc::new(text),
        )
    }
}

/// A styled arrow ready to be rendered.
#[derive(Debug, Clone)]
pub struct Arrow {
    definition: Rc<ArrowDefinition>,
    primitives: DrawingPrimitives,
}

impl Arrow {
    /// Straight arrow from `source` to `target`.
    pub fn straight(
        definition: Rc<ArrowDefinition>,
        source: Point,
        target: Point,
        label: Option<&str>,
        placement: LabelPlacement,
    ) -> Self {
        let primitives =
            straight_primitives(source, target, label, placement, definition.head_length());
        Self {
            definition,
            primitives,
        }
    }

    /// Elbow arrow along `path`.
    pub fn elbow(
        definition: Rc<ArrowDefinition>,
        path: &ElbowPath,
        label: Option<&ElbowLabel>,
    ) -> Self {
        let primitives = elbow_primitives(path, label, definition.head_length());
        Self {
            definition,
            primitives,
        }
    }

    pub fn primitives(&self) -> &DrawingPrimitives {
        &self.primitives
    }

    /// Paints the primitives: strokes and heads on the arrow layer, the label
    /// on the text layer.
    pub fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let stroke = self.definition.stroke();
        let color = stroke.color();

        for primitive in &self.primitives {
            match primitive {
                Primitive::Line { start, end } => {
                    let line = svg_element::Line::new()
                        .set("x1", start.x())
                        .set("y1", start.y())
                        .set("x2", end.x())
                        .set("y2", end.y());
                    output.add_to_layer(
                        RenderLayer::Arrow,
                        Box::new(crate::apply_stroke!(line, stroke)),
                    );
                }
                Primitive::Polyline(points) => {
                    let path = svg_element::Path::new()
                        .set("d", path_data(points))
                        .set("fill", "none");
                    output.add_to_layer(
                        RenderLayer::Arrow,
                        Box::new(crate::apply_stroke!(path, stroke)),
                    );
                }
                Primitive::Polygon(points) => {
                    let polygon = svg_element::Polygon::new()
                        .set("points", points_attribute(points))
                        .set("fill", color.to_string())
                        .set("fill-opacity", color.alpha());
                    output.add_to_layer(RenderLayer::Arrow, Box::new(polygon));
                }
                Primitive::Text { position, content } => {
                    let text = self.definition.text().to_svg(content, *position);
                    output.add_to_layer(RenderLayer::Text, Box::new(text));
                }
            }
        }

        trace!(primitives = self.primitives.len(); "Arrow rendered");
        output
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn points_close(a: Point, b: Point, epsilon: f32) -> bool {
        approx_eq!(f32, a.x(), b.x(), epsilon = epsilon)
            && approx_eq!(f32, a.y(), b.y(), epsilon = epsilon)
    }

    /// The shortened end lies on the segment, exactly one head length from the target.
    fn check_shortened_end_on_segment(source: Point, target: Point) -> Result<(), TestCaseError> {
        let length = source.distance(target);
        prop_assume!(length > DEFAULT_HEAD_LENGTH + 0.01);

        let arrow = render_straight_arrow(source, target, None, LabelPlacement::Inline);
        let end = arrow.body().unwrap()[1];

        prop_assert!(approx_eq!(f32, end.distance(target), DEFAULT_HEAD_LENGTH, epsilon = 0.01));
        prop_assert!(approx_eq!(
            f32,
            source.distance(end) + end.distance(target),
            length,
            epsilon = 0.05
        ));
        Ok(())
    }

    /// Both base corners are one head length from the tip and mirror each other
    /// across the direction line.
    fn check_head_is_isosceles(source: Point, target: Point) -> Result<(), TestCaseError> {
        let arrow = render_straight_arrow(source, target, None, LabelPlacement::Inline);
        let head = arrow.head().unwrap();
        let (tip, left, right) = (head[0], head[1], head[2]);

        prop_assert!(approx_eq!(f32, tip.distance(left), DEFAULT_HEAD_LENGTH, epsilon = 0.01));
        prop_assert!(approx_eq!(f32, tip.distance(right), DEFAULT_HEAD_LENGTH, epsilon = 0.01));

        // The midpoint of the base lies on the reverse direction from the tip
        let angle = source.angle_to(target);
        let base_mid = left.midpoint(right);
        let expected = tip.offset_polar(angle, -DEFAULT_HEAD_LENGTH * FRAC_PI_6.cos());
        prop_assert!(points_close(base_mid, expected, 0.01));
        Ok(())
    }

    /// A two-point elbow arrow is geometrically the straight arrow.
    fn check_two_point_elbow_is_straight(a: Point, b: Point) -> Result<(), TestCaseError> {
        let straight = render_straight_arrow(a, b, None, LabelPlacement::Inline);
        let elbow = render_elbow_arrow(&ElbowPath::new(vec![a, b]).unwrap(), None);

        let straight_points = straight
            .body()
            .unwrap()
            .into_iter()
            .chain(straight.head().unwrap().iter().copied());
        let elbow_points = elbow
            .body()
            .unwrap()
            .into_iter()
            .chain(elbow.head().unwrap().iter().copied());
        for (s, e) in straight_points.zip(elbow_points) {
            prop_assert!(points_close(s, e, 1e-3));
        }
        Ok(())
    }

    /// Translating the inputs translates the outputs.
    fn check_translation_invariance(
        source: Point,
        target: Point,
        offset: Point,
    ) -> Result<(), TestCaseError> {
        prop_assume!(source.distance(target) > 1.0);

        let moved = render_straight_arrow(
            source.add_point(offset),
            target.add_point(offset),
            Some("label"),
            LabelPlacement::Above,
        );
        let expected = render_straight_arrow(source, target, Some("label"), LabelPlacement::Above)
            .translate(offset);

        for (m, e) in moved.iter().zip(expected.iter()) {
            match (m, e) {
                (Primitive::Line { start: s1, end: e1 }, Primitive::Line { start: s2, end: e2 }) => {
                    prop_assert!(points_close(*s1, *s2, 0.05));
                    prop_assert!(points_close(*e1, *e2, 0.05));
                }
                (Primitive::Polygon(p1), Primitive::Polygon(p2)) => {
                    for (a, b) in p1.iter().zip(p2) {
                        prop_assert!(points_close(*a, *b, 0.05));
                    }
                }
                (Primitive::Text { position: a, .. }, Primitive::Text { position: b, .. }) => {
                    prop_assert!(points_close(*a, *b, 0.05));
                }
                _ => prop_assert!(false, "primitive kinds differ: {m:?} vs {e:?}"),
            }
        }
        Ok(())
    }

    /// Reversing a segment turns the head around by π.
    fn check_reverse_flips_by_pi(a: Point, b: Point) -> Result<(), TestCaseError> {
        prop_assume!(a.distance(b) > 0.1);

        let forward = Arrowhead::new(b, a.angle_to(b), DEFAULT_HEAD_LENGTH);
        let backward = Arrowhead::new(a, b.angle_to(a), DEFAULT_HEAD_LENGTH);
        let diff = (forward.angle() - backward.angle()).abs();

        prop_assert!(approx_eq!(f32, diff, std::f32::consts::PI, epsilon = 1e-3));
        Ok(())
    }

    /// No input combination produces NaN coordinates.
    fn check_output_is_finite(a: Point, b: Point) -> Result<(), TestCaseError> {
        let arrow = render_straight_arrow(a, b, Some("x"), LabelPlacement::Inline);
        prop_assert!(arrow.is_finite());
        Ok(())
    }

    proptest! {
        #[test]
        fn shortened_end_on_segment(source in point_strategy(), target in point_strategy()) {
            check_shortened_end_on_segment(source, target)?;
        }

        #[test]
        fn head_is_isosceles(source in point_strategy(), target in point_strategy()) {
            check_head_is_isosceles(source, target)?;
        }

        #[test]
        fn two_point_elbow_is_straight(a in point_strategy(), b in point_strategy()) {
            check_two_point_elbow_is_straight(a, b)?;
        }

        #[test]
        fn translation_invariance(
            source in point_strategy(),
            target in point_strategy(),
            offset in point_strategy(),
        ) {
            check_translation_invariance(source, target, offset)?;
        }

        #[test]
        fn reverse_flips_by_pi(a in point_strategy(), b in point_strategy()) {
            check_reverse_flips_by_pi(a, b)?;
        }

        #[test]
        fn output_is_finite(a in point_strategy(), b in point_strategy()) {
            check_output_is_finite(a, b)?;
        }
    }
}
