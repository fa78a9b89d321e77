//! The figure model: static layout data loaded from TOML.
//!
//! A figure is fully described by absolute coordinates. Nothing is laid out
//! automatically; the model only carries the data and checks it is usable
//! before rendering.
//!
//! ```toml
//! title = "Two steps"
//! canvas = { width = 300, height = 200 }
//!
//! [palette.process]
//! fill = "#2B4B8C"
//! description = "Process Steps"
//!
//! [[nodes]]
//! x = 80
//! y = 20
//! width = 140
//! height = 45
//! role = "process"
//! lines = ["First"]
//!
//! [[arrows]]
//! kind = "straight"
//! from = [150, 65]
//! to = [150, 85]
//! ```

use std::ops::Range;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use chartline_core::{
    color::Color,
    draw::{ArrowError, ElbowLabel, ElbowPath, LabelPlacement, TextAnchor},
    geometry::{Bounds, Point, Size},
};

/// Errors raised while loading or validating a figure.
#[derive(Debug, Error)]
pub enum FigureError {
    /// The source is not valid TOML or does not match the figure schema.
    #[error("{message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("canvas must have a positive size, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("{item} must have a positive size, got {width}x{height}")]
    InvalidSize {
        item: String,
        width: f32,
        height: f32,
    },

    #[error("{item} uses unknown role `{role}`")]
    UnknownRole { item: String, role: String },

    #[error("invalid color `{value}` in role `{role}`: {reason}")]
    InvalidColor {
        role: String,
        value: String,
        reason: String,
    },

    #[error("{item} has a non-finite coordinate")]
    NonFiniteCoordinate { item: String },

    #[error("arrow {index}: {source}")]
    Arrow { index: usize, source: ArrowError },

    #[error("arrow {index} has a label but no `label_at` anchor")]
    MissingLabelAnchor { index: usize },

    #[error("node {index} has no caption lines")]
    EmptyNode { index: usize },
}

impl From<toml::de::Error> for FigureError {
    fn from(err: toml::de::Error) -> Self {
        Self::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

/// Fill and caption colors for a category of boxes.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleStyle {
    pub fill: String,
    #[serde(default = "default_caption_color")]
    pub text: String,
    /// Legend entry text; roles without one are left out of the legend.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_caption_color() -> String {
    "#FFFFFF".to_string()
}

/// Canvas dimensions.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
}

impl Canvas {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A filled box with one or more caption lines.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub role: String,
    pub lines: Vec<String>,
    #[serde(default)]
    pub font_size: Option<u16>,
}

impl NodeSpec {
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

/// A connector between two boxes.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum ArrowSpec {
    Straight {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        placement: LabelPlacement,
    },
    Elbow {
        points: Vec<[f32; 2]>,
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        label_at: Option<[f32; 2]>,
    },
}

impl ArrowSpec {
    fn points(&self) -> Vec<Point> {
        match self {
            Self::Straight { from, to, .. } => vec![Point::from(*from), Point::from(*to)],
            Self::Elbow { points, .. } => points.iter().copied().map(Point::from).collect(),
        }
    }

    /// Builds the validated elbow path and optional label of an elbow arrow.
    ///
    /// Returns `Ok(None)` for straight arrows.
    pub fn elbow(&self) -> Result<Option<(ElbowPath, Option<ElbowLabel>)>, ArrowError> {
        let Self::Elbow {
            points,
            label,
            label_at,
        } = self
        else {
            return Ok(None);
        };

        let path = ElbowPath::new(points.iter().copied().map(Point::from).collect())?;
        let label = label
            .as_ref()
            .zip(*label_at)
            .map(|(text, anchor)| ElbowLabel::new(text.as_str(), Point::from(anchor)));
        Ok(Some((path, label)))
    }
}

/// Free-standing text, such as a branch name next to a short arrow.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Annotation {
    pub x: f32,
    pub y: f32,
    pub text: String,
    #[serde(default)]
    pub font_size: Option<u16>,
    #[serde(default = "default_annotation_anchor")]
    pub anchor: TextAnchor,
    #[serde(default)]
    pub italic: bool,
}

fn default_annotation_anchor() -> TextAnchor {
    TextAnchor::Start
}

/// A titled block of body text.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub role: String,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    /// Body text color; defaults to the role's caption color.
    #[serde(default)]
    pub body_color: Option<String>,
}

impl PanelSpec {
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

/// Placement of the color legend.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegendSpec {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub title: Option<String>,
}

/// A complete static figure.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Figure {
    #[serde(default)]
    title: Option<String>,
    canvas: Canvas,
    #[serde(default)]
    palette: IndexMap<String, RoleStyle>,
    #[serde(default)]
    nodes: Vec<NodeSpec>,
    #[serde(default)]
    arrows: Vec<ArrowSpec>,
    #[serde(default)]
    annotations: Vec<Annotation>,
    #[serde(default)]
    panels: Vec<PanelSpec>,
    #[serde(default)]
    legend: Option<LegendSpec>,
}

impl Figure {
    /// Parses and validates a figure from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError::Syntax`] with the byte span of the offending
    /// TOML, or the first validation error found.
    pub fn from_toml(source: &str) -> Result<Self, FigureError> {
        let figure: Figure = toml::from_str(source)?;
        figure.validate()?;
        Ok(figure)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn palette(&self) -> &IndexMap<String, RoleStyle> {
        &self.palette
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn arrows(&self) -> &[ArrowSpec] {
        &self.arrows
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    pub fn legend(&self) -> Option<&LegendSpec> {
        self.legend.as_ref()
    }

    /// Looks up the style of `role`.
    pub fn role(&self, role: &str) -> Option<&RoleStyle> {
        self.palette.get(role)
    }

    /// Palette entries that carry a legend description, in palette order.
    pub fn legend_entries(&self) -> impl Iterator<Item = (&str, &RoleStyle)> {
        self.palette
            .iter()
            .filter(|(_, style)| style.description.is_some())
            .map(|(name, style)| (name.as_str(), style))
    }

    /// Checks that the figure can be rendered.
    ///
    /// Content that extends past the canvas is not an error; it is reported
    /// with a warning because the SVG viewport clips it.
    pub fn validate(&self) -> Result<(), FigureError> {
        let Canvas { width, height } = self.canvas;
        if !(width > 0.0 && height > 0.0) {
            return Err(FigureError::InvalidCanvas { width, height });
        }

        for (role, style) in &self.palette {
            for value in [&style.fill, &style.text] {
                Color::new(value).map_err(|reason| FigureError::InvalidColor {
                    role: role.clone(),
                    value: value.clone(),
                    reason,
                })?;
            }
        }

        let canvas_bounds = Bounds::new_from_top_left(Point::default(), self.canvas.size());

        for (index, node) in self.nodes.iter().enumerate() {
            let item = format!("node {index}");
            self.check_role(&item, &node.role)?;
            check_finite(
                &item,
                &[Point::new(node.x, node.y), Point::new(node.width, node.height)],
            )?;
            check_size(&item, node.width, node.height)?;
            if node.lines.is_empty() {
                return Err(FigureError::EmptyNode { index });
            }
            warn_if_outside(&item, canvas_bounds, node.bounds());
        }

        for (index, panel) in self.panels.iter().enumerate() {
            let item = format!("panel {index}");
            self.check_role(&item, &panel.role)?;
            if let Some(value) = &panel.body_color {
                Color::new(value).map_err(|reason| FigureError::InvalidColor {
                    role: panel.role.clone(),
                    value: value.clone(),
                    reason,
                })?;
            }
            check_finite(
                &item,
                &[Point::new(panel.x, panel.y), Point::new(panel.width, panel.height)],
            )?;
            check_size(&item, panel.width, panel.height)?;
            warn_if_outside(&item, canvas_bounds, panel.bounds());
        }

        for (index, arrow) in self.arrows.iter().enumerate() {
            let item = format!("arrow {index}");
            check_finite(&item, &arrow.points())?;
            arrow
                .elbow()
                .map_err(|source| FigureError::Arrow { index, source })?;

            if let ArrowSpec::Elbow {
                label: Some(_),
                label_at: None,
                ..
            } = arrow
            {
                return Err(FigureError::MissingLabelAnchor { index });
            }
        }

        for (index, annotation) in self.annotations.iter().enumerate() {
            check_finite(
                &format!("annotation {index}"),
                &[Point::new(annotation.x, annotation.y)],
            )?;
        }

        debug!(
            nodes = self.nodes.len(),
            arrows = self.arrows.len(),
            panels = self.panels.len();
            "Figure validated"
        );
        Ok(())
    }

    fn check_role(&self, item: &str, role: &str) -> Result<(), FigureError> {
        if self.palette.contains_key(role) {
            Ok(())
        } else {
            Err(FigureError::UnknownRole {
                item: item.to_string(),
                role: role.to_string(),
            })
        }
    }
}

fn check_finite(item: &str, points: &[Point]) -> Result<(), FigureError> {
    if points.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(FigureError::NonFiniteCoordinate {
            item: item.to_string(),
        })
    }
}

fn check_size(item: &str, width: f32, height: f32) -> Result<(), FigureError> {
    if width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(FigureError::InvalidSize {
            item: item.to_string(),
            width,
            height,
        })
    }
}

fn warn_if_outside(item: &str, canvas: Bounds, bounds: Bounds) {
    let inside = canvas.contains(bounds.min_point())
        && canvas.contains(Point::new(bounds.max_x(), bounds.max_y()));
    if !inside {
        warn!(item; "Drawable extends past the canvas and will be clipped");
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const MINIMAL: &str = r##"
        canvas = { width = 300, height = 200 }

        [palette.process]
        fill = "#2B4B8C"
        description = "Process Steps"

        [palette.hold]
        fill = "#F9A825"
        text = "#2D3748"

        [[nodes]]
        x = 80
        y = 20
        width = 140
        height = 45
        role = "process"
        lines = ["First"]
    "##;

    fn with(extra: &str) -> String {
        format!("{MINIMAL}\n{extra}")
    }

    #[test]
    fn test_minimal_figure() {
        let figure = Figure::from_toml(MINIMAL).unwrap();

        assert!(figure.title().is_none());
        assert_approx_eq!(f32, figure.canvas().width, 300.0);
        assert_eq!(figure.nodes().len(), 1);
        assert!(figure.arrows().is_empty());
        assert!(figure.legend().is_none());
        assert_eq!(figure.role("hold").map(|r| r.text.as_str()), Some("#2D3748"));
        assert_eq!(figure.role("process").map(|r| r.text.as_str()), Some("#FFFFFF"));
    }

    #[test]
    fn test_legend_entries_keep_palette_order() {
        let figure = Figure::from_toml(&with(
            r##"
            [palette.decision]
            fill = "#1E2761"
            description = "Decision Points"
            "##,
        ))
        .unwrap();

        let names: Vec<_> = figure.legend_entries().map(|(name, _)| name).collect();
        assert_eq!(names, ["process", "decision"]);
    }

    #[test]
    fn test_arrow_kinds() {
        let figure = Figure::from_toml(&with(
            r#"
            [[arrows]]
            kind = "straight"
            from = [150, 65]
            to = [150, 85]
            label = "next"
            placement = "above"

            [[arrows]]
            kind = "elbow"
            points = [[380, 367], [200, 367], [200, 410]]
            label = "Shortlist"
            label_at = [290, 357]
            "#,
        ))
        .unwrap();

        assert_eq!(figure.arrows().len(), 2);
        match &figure.arrows()[0] {
            ArrowSpec::Straight { placement, .. } => assert_eq!(*placement, LabelPlacement::Above),
            ArrowSpec::Elbow { .. } => panic!("Expected straight arrow"),
        }

        let (path, label) = figure.arrows()[1].elbow().unwrap().unwrap();
        assert_eq!(path.points().len(), 3);
        let label = label.unwrap();
        assert_eq!(label.text(), "Shortlist");
        assert_eq!(label.anchor(), Point::new(290.0, 357.0));
    }

    #[test]
    fn test_syntax_error_keeps_span() {
        let source = "canvas = { width = 300, height = }";
        let err = Figure::from_toml(source).unwrap_err();
        match err {
            FigureError::Syntax { span, .. } => {
                let span = span.unwrap();
                assert!(span.start <= source.len());
            }
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_arrow_kind_is_syntax_error() {
        let err = Figure::from_toml(&with(
            r#"
            [[arrows]]
            kind = "curved"
            from = [0, 0]
            to = [1, 1]
            "#,
        ))
        .unwrap_err();
        assert!(matches!(err, FigureError::Syntax { .. }));
    }

    #[test]
    fn test_invalid_canvas() {
        let source = MINIMAL.replace("width = 300", "width = 0");
        let err = Figure::from_toml(&source).unwrap_err();
        assert!(matches!(err, FigureError::InvalidCanvas { .. }));
    }

    #[test]
    fn test_unknown_role() {
        let err = Figure::from_toml(&with(
            r#"
            [[panels]]
            x = 0
            y = 0
            width = 100
            height = 100
            role = "audit"
            title = "Audit"
            "#,
        ))
        .unwrap_err();

        match err {
            FigureError::UnknownRole { item, role } => {
                assert_eq!(item, "panel 0");
                assert_eq!(role, "audit");
            }
            other => panic!("Expected unknown role, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_color() {
        let source = MINIMAL.replace("#2B4B8C", "not-a-color");
        let err = Figure::from_toml(&source).unwrap_err();
        assert!(matches!(err, FigureError::InvalidColor { ref role, .. } if role == "process"));
    }

    #[test]
    fn test_elbow_with_one_point() {
        let err = Figure::from_toml(&with(
            r#"
            [[arrows]]
            kind = "elbow"
            points = [[10, 10]]
            "#,
        ))
        .unwrap_err();

        match err {
            FigureError::Arrow { index, source } => {
                assert_eq!(index, 0);
                assert_eq!(source, ArrowError::TooFewPoints(1));
            }
            other => panic!("Expected arrow error, got {other:?}"),
        }
    }

    #[test]
    fn test_elbow_label_without_anchor() {
        let err = Figure::from_toml(&with(
            r#"
            [[arrows]]
            kind = "elbow"
            points = [[10, 10], [10, 50]]
            label = "Pool"
            "#,
        ))
        .unwrap_err();
        assert!(matches!(err, FigureError::MissingLabelAnchor { index: 0 }));
    }

    #[test]
    fn test_node_without_lines() {
        let source = MINIMAL.replace("lines = [\"First\"]", "lines = []");
        let err = Figure::from_toml(&source).unwrap_err();
        assert!(matches!(err, FigureError::EmptyNode { index: 0 }));
    }

    #[test]
    fn test_non_finite_coordinate() {
        let err = Figure::from_toml(&with(
            r#"
            [[arrows]]
            kind = "straight"
            from = [nan, 0]
            to = [10, 10]
            "#,
        ))
        .unwrap_err();
        assert!(matches!(err, FigureError::NonFiniteCoordinate { .. }));
    }

    #[test]
    fn test_content_outside_canvas_is_not_an_error() {
        let source = MINIMAL.replace("x = 80", "x = 250");
        assert!(Figure::from_toml(&source).is_ok());
    }

    #[test]
    fn test_non_positive_node_size() {
        let source = MINIMAL
            .replace("width = 140", "width = -40")
            .replace("height = 45", "height = -10");
        let err = Figure::from_toml(&source).unwrap_err();

        match err {
            FigureError::InvalidSize {
                item,
                width,
                height,
            } => {
                assert_eq!(item, "node 0");
                assert_approx_eq!(f32, width, -40.0);
                assert_approx_eq!(f32, height, -10.0);
            }
            other => panic!("Expected invalid size, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_height_panel() {
        let err = Figure::from_toml(&with(
            r#"
            [[panels]]
            x = 0
            y = 0
            width = 100
            height = 0
            role = "process"
            title = "Audit"
            "#,
        ))
        .unwrap_err();
        assert!(matches!(err, FigureError::InvalidSize { ref item, .. } if item == "panel 0"));
    }

    #[test]
    fn test_arrow_fields_of_other_kind_rejected() {
        for arrow in [
            "kind = \"straight\"\nfrom = [0, 0]\nto = [10, 10]\nlabel_at = [5, 5]",
            "kind = \"straight\"\nfrom = [0, 0]\nto = [10, 10]\nplacment = \"above\"",
            "kind = \"elbow\"\npoints = [[0, 0], [0, 10]]\nplacement = \"above\"",
        ] {
            let err = Figure::from_toml(&with(&format!("[[arrows]]\n{arrow}"))).unwrap_err();
            assert!(
                matches!(err, FigureError::Syntax { .. }),
                "Expected syntax error for {arrow:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_annotation_defaults() {
        let figure = Figure::from_toml(&with(
            r#"
            [[annotations]]
            x = 470
            y = 402
            text = "Hold"
            "#,
        ))
        .unwrap();

        let annotation = &figure.annotations()[0];
        assert_eq!(annotation.anchor, TextAnchor::Start);
        assert!(!annotation.italic);
        assert!(annotation.font_size.is_none());
    }
}
