//! Color legend drawn inside the canvas.

use log::debug;
use svg::node::element as svg_element;

use chartline_core::{
    color::Color,
    draw::{Baseline, Drawable, LayeredOutput, RenderLayer, Text, TextAnchor, TextDefinition},
    geometry::Point,
};

use super::parse_color;
use crate::{
    export,
    figure::{Figure, LegendSpec},
};

const SWATCH_SIZE: f32 = 12.0;
const SWATCH_GAP: f32 = 6.0;
const ROW_HEIGHT: f32 = 20.0;
const TITLE_FONT_SIZE: u16 = 11;
const ENTRY_FONT_SIZE: u16 = 10;

/// One swatch and description per palette role that has a description.
#[derive(Debug)]
pub(super) struct Legend<'a> {
    origin: Point,
    title: Option<&'a str>,
    entries: Vec<(Color, &'a str)>,
    title_text: TextDefinition,
    entry_text: TextDefinition,
}

impl<'a> Legend<'a> {
    pub(super) fn new(
        spec: &'a LegendSpec,
        figure: &'a Figure,
        font_family: &str,
        ink: Color,
    ) -> Result<Self, export::Error> {
        let entries = figure
            .legend_entries()
            .map(|(role, style)| {
                let description = style.description.as_deref().unwrap_or_default();
                Ok((parse_color(role, &style.fill)?, description))
            })
            .collect::<Result<Vec<_>, export::Error>>()?;

        let mut entry_text = TextDefinition::new();
        entry_text.set_font_family(font_family);
        entry_text.set_font_size(ENTRY_FONT_SIZE);
        entry_text.set_color(Some(ink));
        entry_text.set_anchor(TextAnchor::Start);
        entry_text.set_baseline(Baseline::Middle);

        let mut title_text = entry_text.clone();
        title_text.set_font_size(TITLE_FONT_SIZE);
        title_text.set_font_weight(Some("bold"));

        debug!(entries = entries.len(); "Legend prepared");

        Ok(Self {
            origin: Point::new(spec.x, spec.y),
            title: spec.title.as_deref(),
            entries,
            title_text,
            entry_text,
        })
    }

    /// Center line of row `index`, counting the title as row 0 when present.
    fn row_y(&self, index: usize) -> f32 {
        let skip = if self.title.is_some() { 1 } else { 0 };
        self.origin.y() + (index + skip) as f32 * ROW_HEIGHT
    }

    pub(super) fn render_to_layers(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        if let Some(title) = self.title {
            output.merge(Text::new(&self.title_text, title).render_to_layers(self.origin));
        }

        for (index, (fill, description)) in self.entries.iter().enumerate() {
            let center_y = self.row_y(index);

            let swatch = svg_element::Rectangle::new()
                .set("x", self.origin.x())
                .set("y", center_y - SWATCH_SIZE / 2.0)
                .set("width", SWATCH_SIZE)
                .set("height", SWATCH_SIZE)
                .set("rx", 2)
                .set("fill", fill.to_string());
            output.add_to_layer(RenderLayer::Content, Box::new(swatch));

            let label_at = Point::new(self.origin.x() + SWATCH_SIZE + SWATCH_GAP, center_y);
            output.merge(Text::new(&self.entry_text, description).render_to_layers(label_at));
        }

        output
    }
}
