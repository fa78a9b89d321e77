//! Drawing primitives produced by the arrow renderers.
//!
//! A [`DrawingPrimitives`] value is pure geometry: where lines, polylines,
//! filled triangles and labels go. Styling (stroke, fill, fonts) is applied
//! later by whoever paints the primitives, see [`Arrow`](crate::draw::Arrow).

use crate::geometry::Point;

/// A single shape or text descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight stroked segment
    Line { start: Point, end: Point },
    /// Connected stroked path through all points, unfilled
    Polyline(Vec<Point>),
    /// Closed filled polygon
    Polygon(Vec<Point>),
    /// Text anchored at `position`
    Text { position: Point, content: String },
}

impl Primitive {
    /// Returns a copy moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        let shift = |points: &[Point]| points.iter().map(|p| p.add_point(offset)).collect();
        match self {
            Self::Line { start, end } => Self::Line {
                start: start.add_point(offset),
                end: end.add_point(offset),
            },
            Self::Polyline(points) => Self::Polyline(shift(points)),
            Self::Polygon(points) => Self::Polygon(shift(points)),
            Self::Text { position, content } => Self::Text {
                position: position.add_point(offset),
                content: content.clone(),
            },
        }
    }

    /// Returns the points of a stroked primitive (line or polyline).
    pub fn stroke_points(&self) -> Option<Vec<Point>> {
        match self {
            Self::Line { start, end } => Some(vec![*start, *end]),
            Self::Polyline(points) => Some(points.clone()),
            Self::Polygon(_) | Self::Text { .. } => None,
        }
    }
}

/// An ordered list of drawing primitives.
///
/// ```
/// # use chartline_core::draw::{DrawingPrimitives, Primitive};
/// # use chartline_core::geometry::Point;
/// let mut primitives = DrawingPrimitives::new();
/// primitives.push(Primitive::Line {
///     start: Point::new(0.0, 0.0),
///     end: Point::new(10.0, 0.0),
/// });
/// assert_eq!(primitives.len(), 1);
/// assert!(primitives.text().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingPrimitives {
    primitives: Vec<Primitive>,
}

impl DrawingPrimitives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    /// Points of the first stroked primitive, i.e. the connector body.
    pub fn body(&self) -> Option<Vec<Point>> {
        self.primitives.iter().find_map(Primitive::stroke_points)
    }

    /// Vertices of the first polygon, i.e. the arrowhead.
    pub fn head(&self) -> Option<&[Point]> {
        self.primitives.iter().find_map(|primitive| match primitive {
            Primitive::Polygon(points) => Some(points.as_slice()),
            _ => None,
        })
    }

    /// Position and content of the first text primitive.
    pub fn text(&self) -> Option<(Point, &str)> {
        self.primitives.iter().find_map(|primitive| match primitive {
            Primitive::Text { position, content } => Some((*position, content.as_str())),
            _ => None,
        })
    }

    /// Returns a copy with every primitive moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            primitives: self.primitives.iter().map(|p| p.translate(offset)).collect(),
        }
    }

    /// Returns true if no primitive carries a NaN or infinite coordinate.
    pub fn is_finite(&self) -> bool {
        self.primitives.iter().all(|primitive| match primitive {
            Primitive::Line { start, end } => start.is_finite() && end.is_finite(),
            Primitive::Polyline(points) | Primitive::Polygon(points) => {
                points.iter().all(|p| p.is_finite())
            }
            Primitive::Text { position, .. } => position.is_finite(),
        })
    }
}

impl<'a> IntoIterator for &'a DrawingPrimitives {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

/// SVG path data (`M x,y L x,y ...`) through the given points.
pub fn path_data(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let command = if i == 0 { 'M' } else { 'L' };
            format!("{command} {},{}", p.x(), p.y())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG `points` attribute (`x,y x,y ...`) for a polygon.
pub fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
