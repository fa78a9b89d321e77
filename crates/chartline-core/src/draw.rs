//! Drawable components for figure rendering.
//!
//! Boxes, panels and text implement the [`Drawable`] trait, which renders
//! into z-ordered [`LayeredOutput`] at a center position. Arrows are pure
//! geometry first ([`render_straight_arrow`], [`render_elbow_arrow`] produce
//! [`DrawingPrimitives`]) and are painted by [`Arrow`].

mod arrow;
mod layer;
mod node;
mod positioned;
mod primitive;
mod stroke;
mod text;

pub use arrow::{
    Arrow, ArrowDefinition, ArrowError, Arrowhead, DEFAULT_HEAD_LENGTH, ElbowLabel, ElbowPath,
    LabelPlacement, render_elbow_arrow, render_straight_arrow,
};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node::{BoxDefinition, LabeledBox, Panel, PanelDefinition};
pub use positioned::PositionedDrawable;
pub use primitive::{DrawingPrimitives, Primitive, path_data, points_attribute};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Baseline, Text, TextAnchor, TextDefinition};

use crate::geometry::{Point, Size};

/// A visual element that renders itself around a center position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element centered at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The footprint of the element.
    fn size(&self) -> Size;
}
