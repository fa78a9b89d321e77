//! Provides `PositionedDrawable`, a wrapper for a Drawable and its absolute position.

use crate::{
    draw::{Drawable, LayeredOutput},
    geometry::{Bounds, Point},
};

/// A drawable object together with the absolute position of its center.
///
/// Figures describe boxes by their top-left corner; [`with_top_left`](Self::with_top_left)
/// converts that into the center position drawables expect.
#[derive(Debug, Clone)]
pub struct PositionedDrawable<D: Drawable> {
    drawable: D,
    position: Point,
}

impl<D: Drawable> PositionedDrawable<D> {
    /// Construct a new `PositionedDrawable` centered on the origin.
    pub fn new(drawable: D) -> Self {
        Self {
            drawable,
            position: Point::default(),
        }
    }

    /// Set the center position (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Place the drawable so that its top-left corner is at `top_left`.
    pub fn with_top_left(self, top_left: Point) -> Self {
        let bounds = Bounds::new_from_top_left(top_left, self.drawable.size());
        self.with_position(bounds.center())
    }

    pub fn render_to_layers(&self) -> LayeredOutput {
        self.drawable.render_to_layers(self.position)
    }

    pub fn bounds(&self) -> Bounds {
        self.position.to_bounds(self.drawable.size())
    }

    pub fn inner(&self) -> &D {
        &self.drawable
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::{BoxDefinition, LabeledBox, Text, TextDefinition},
        geometry::Size,
    };

    #[test]
    fn test_positioned_drawable_default_position() {
        let text_def = TextDefinition::default();
        let positioned = PositionedDrawable::new(Text::new(&text_def, "Hold"));

        assert!(positioned.position().is_zero());
        assert_eq!(positioned.inner().content(), "Hold");
    }

    #[test]
    fn test_positioned_drawable_with_top_left() {
        let definition = BoxDefinition::new(
            Color::new("#F9A825").unwrap(),
            Rc::new(TextDefinition::new()),
        );
        let node = LabeledBox::new(&definition, Size::new(140.0, 45.0), vec!["Talent Pool"]);

        let positioned = PositionedDrawable::new(node).with_top_left(Point::new(380.0, 410.0));

        assert_approx_eq!(f32, positioned.position().x(), 450.0);
        assert_approx_eq!(f32, positioned.position().y(), 432.5);

        let bounds = positioned.bounds();
        assert_approx_eq!(f32, bounds.min_x(), 380.0);
        assert_approx_eq!(f32, bounds.min_y(), 410.0);
        assert_approx_eq!(f32, bounds.max_x(), 520.0);
        assert_approx_eq!(f32, bounds.max_y(), 455.0);
    }

    #[test]
    fn test_positioned_drawable_renders_at_position() {
        let definition = BoxDefinition::new(
            Color::new("#2E7D32").unwrap(),
            Rc::new(TextDefinition::new()),
        );
        let node = LabeledBox::new(&definition, Size::new(140.0, 35.0), vec!["Offer and Onboarding"]);
        let positioned = PositionedDrawable::new(node).with_top_left(Point::new(270.0, 620.0));

        let svg: String = positioned
            .render_to_layers()
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();
        assert!(svg.contains("x=\"270\""));
        assert!(svg.contains("y=\"620\""));
    }
}
