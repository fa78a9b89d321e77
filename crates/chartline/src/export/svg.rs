//! SVG export of a [`Figure`].
//!
//! The exporter turns every figure element into a drawable, collects their
//! output in a single [`LayeredOutput`] and flattens it into an
//! [`svg::Document`] sized to the figure canvas.

mod legend;

use std::{collections::HashMap, fs::File, io::Write, path::Path, rc::Rc};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use chartline_core::{
    color::Color,
    draw::{
        Arrow, ArrowDefinition, Baseline, BoxDefinition, Drawable, LabeledBox, LayeredOutput,
        Panel, PanelDefinition, PositionedDrawable, RenderLayer, StrokeDefinition, Text,
        TextDefinition,
    },
    geometry::{Point, Size},
};

use crate::{
    config::AppConfig,
    export,
    figure::{Annotation, ArrowSpec, Figure, NodeSpec, PanelSpec},
};

/// Id of the drop shadow filter referenced by boxes and panels.
const SHADOW_FILTER_ID: &str = "shadow";

const NODE_FONT_SIZE: u16 = 11;
const NODE_FONT_WEIGHT: &str = "500";
const PANEL_TITLE_FONT: &str = "Georgia, serif";
const PANEL_TITLE_FONT_SIZE: u16 = 14;
const PANEL_BODY_FONT_SIZE: u16 = 10;

/// Fill and caption colors of a palette role.
#[derive(Debug, Clone, Copy)]
struct RoleColors {
    fill: Color,
    text: Color,
}

/// Renders figures to SVG documents.
#[derive(Debug)]
pub struct SvgExporter<'a> {
    config: &'a AppConfig,
}

impl<'a> SvgExporter<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    /// Builds the complete SVG document for `figure`.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when a configured or palette color
    /// cannot be parsed, or an elbow arrow is malformed.
    pub fn render_document(&self, figure: &Figure) -> Result<Document, export::Error> {
        let canvas = figure.canvas().size();
        let style = self.config.style();
        let shadow = style.shadow().then_some(SHADOW_FILTER_ID);

        let roles = role_colors(figure)?;
        self.config
            .arrow()
            .validate()
            .map_err(export::Error::Render)?;
        let ink = self.config.arrow().color().map_err(export::Error::Render)?;

        let mut output = LayeredOutput::new();

        if let Some(background) = style.background_color().map_err(export::Error::Render)? {
            output.add_to_layer(
                RenderLayer::Background,
                Box::new(background_rect(canvas, background)),
            );
        }

        for node in figure.nodes() {
            output.merge(self.render_node(node, &roles, shadow)?);
        }

        for panel in figure.panels() {
            output.merge(self.render_panel(panel, &roles, shadow)?);
        }

        let arrow_definition = Rc::new(self.arrow_definition(ink)?);
        for (index, arrow) in figure.arrows().iter().enumerate() {
            output.merge(render_arrow(index, arrow, &arrow_definition)?);
        }

        for annotation in figure.annotations() {
            output.merge(self.render_annotation(annotation, ink));
        }

        if let Some(spec) = figure.legend() {
            let legend = legend::Legend::new(spec, figure, style.font_family(), ink)?;
            output.merge(legend.render_to_layers());
        }

        debug!(
            nodes = figure.nodes().len(),
            arrows = figure.arrows().len();
            "Figure drawables rendered"
        );

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(title) = figure.title() {
            doc = doc.add(svg_element::Title::new(title));
        }

        if shadow.is_some() {
            doc = doc.add(shadow_definitions());
        }

        Ok(output
            .render()
            .into_iter()
            .fold(doc, |doc, node| doc.add(node)))
    }

    /// Renders `figure` to an SVG string.
    pub fn render_string(&self, figure: &Figure) -> Result<String, export::Error> {
        let doc = self.render_document(figure)?;
        Ok(doc.to_string())
    }

    /// Writes an SVG document to the specified file.
    pub fn write_document(
        &self,
        doc: &Document,
        path: impl AsRef<Path>,
    ) -> Result<(), export::Error> {
        let file_name = path.as_ref().display().to_string();
        info!(file_name; "Creating SVG file");

        let mut f = match File::create(path.as_ref()) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(f, "{doc}") {
            error!(file_name, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }

    fn text_definition(&self, font_size: u16, color: Color) -> TextDefinition {
        let mut text = TextDefinition::new();
        text.set_font_family(self.config.style().font_family());
        text.set_font_size(font_size);
        text.set_color(Some(color));
        text
    }

    fn arrow_definition(&self, ink: Color) -> Result<ArrowDefinition, export::Error> {
        let arrow = self.config.arrow();

        let mut label = self.text_definition(arrow.label_font_size(), ink);
        label.set_italic(true);

        let mut stroke = StrokeDefinition::new(ink, arrow.stroke_width());
        stroke.set_style(arrow.style().map_err(export::Error::Render)?);

        let mut definition = ArrowDefinition::new(Rc::new(stroke), Rc::new(label));
        definition.set_head_length(arrow.head_length());
        Ok(definition)
    }

    fn render_node(
        &self,
        node: &NodeSpec,
        roles: &HashMap<&str, RoleColors>,
        shadow: Option<&str>,
    ) -> Result<LayeredOutput, export::Error> {
        let colors = lookup_role(roles, &node.role)?;

        let mut text = self.text_definition(node.font_size.unwrap_or(NODE_FONT_SIZE), colors.text);
        text.set_font_weight(Some(NODE_FONT_WEIGHT));

        let mut definition = BoxDefinition::new(colors.fill, Rc::new(text));
        definition.set_shadow(shadow);

        let lines = node.lines.iter().map(String::as_str).collect();
        let size = Size::new(node.width, node.height);
        let drawable = PositionedDrawable::new(LabeledBox::new(&definition, size, lines))
            .with_top_left(Point::new(node.x, node.y));

        Ok(drawable.render_to_layers())
    }

    fn render_panel(
        &self,
        panel: &PanelSpec,
        roles: &HashMap<&str, RoleColors>,
        shadow: Option<&str>,
    ) -> Result<LayeredOutput, export::Error> {
        let colors = lookup_role(roles, &panel.role)?;

        let mut title = self.text_definition(PANEL_TITLE_FONT_SIZE, colors.text);
        title.set_font_family(PANEL_TITLE_FONT);
        title.set_font_weight(Some("bold"));
        title.set_baseline(Baseline::Alphabetic);

        let body_color = match &panel.body_color {
            Some(value) => parse_color(&panel.role, value)?,
            None => colors.text,
        };
        let mut body = self.text_definition(PANEL_BODY_FONT_SIZE, body_color);
        body.set_baseline(Baseline::Alphabetic);

        let mut definition = PanelDefinition::new(colors.fill, Rc::new(title), Rc::new(body));
        definition.set_shadow(shadow);

        let lines = panel.body.iter().map(String::as_str).collect();
        let size = Size::new(panel.width, panel.height);
        let drawable = PositionedDrawable::new(Panel::new(&definition, size, &panel.title, lines))
            .with_top_left(Point::new(panel.x, panel.y));

        Ok(drawable.render_to_layers())
    }

    fn render_annotation(&self, annotation: &Annotation, ink: Color) -> LayeredOutput {
        let font_size = annotation
            .font_size
            .unwrap_or(self.config.arrow().label_font_size());

        let mut definition = self.text_definition(font_size, ink);
        definition.set_anchor(annotation.anchor);
        definition.set_baseline(Baseline::Alphabetic);
        definition.set_italic(annotation.italic);

        Text::new(&definition, &annotation.text)
            .render_to_layers(Point::new(annotation.x, annotation.y))
    }
}

fn render_arrow(
    index: usize,
    arrow: &ArrowSpec,
    definition: &Rc<ArrowDefinition>,
) -> Result<LayeredOutput, export::Error> {
    let drawable = match arrow {
        ArrowSpec::Straight {
            from,
            to,
            label,
            placement,
        } => Arrow::straight(
            Rc::clone(definition),
            Point::from(*from),
            Point::from(*to),
            label.as_deref(),
            *placement,
        ),
        ArrowSpec::Elbow { .. } => {
            let (path, label) = arrow
                .elbow()
                .map_err(|err| export::Error::Render(format!("arrow {index}: {err}")))?
                .ok_or_else(|| export::Error::Render(format!("arrow {index} is not an elbow")))?;
            Arrow::elbow(Rc::clone(definition), &path, label.as_ref())
        }
    };

    Ok(drawable.render_to_layers())
}

fn parse_color(role: &str, value: &str) -> Result<Color, export::Error> {
    Color::new(value)
        .map_err(|err| export::Error::Render(format!("invalid color in role `{role}`: {err}")))
}

fn role_colors(figure: &Figure) -> Result<HashMap<&str, RoleColors>, export::Error> {
    figure
        .palette()
        .iter()
        .map(|(name, style)| {
            let colors = RoleColors {
                fill: parse_color(name, &style.fill)?,
                text: parse_color(name, &style.text)?,
            };
            Ok((name.as_str(), colors))
        })
        .collect()
}

fn lookup_role(
    roles: &HashMap<&str, RoleColors>,
    role: &str,
) -> Result<RoleColors, export::Error> {
    roles
        .get(role)
        .copied()
        .ok_or_else(|| export::Error::Render(format!("unknown role `{role}`")))
}

fn background_rect(canvas: Size, color: Color) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", canvas.width())
        .set("height", canvas.height())
        .set("fill", color.to_string())
        .set("fill-opacity", color.alpha())
}

/// `<defs>` holding the soft drop shadow used by boxes and panels.
fn shadow_definitions() -> svg_element::Definitions {
    let drop_shadow = svg_element::FilterEffectDropShadow::new()
        .set("dx", 1)
        .set("dy", 2)
        .set("stdDeviation", 2)
        .set("flood-opacity", 0.15);

    let filter = svg_element::Filter::new()
        .set("id", SHADOW_FILTER_ID)
        .set("x", "-20%")
        .set("y", "-20%")
        .set("width", "140%")
        .set("height", "140%")
        .add(drop_shadow);

    svg_element::Definitions::new().add(filter)
}
