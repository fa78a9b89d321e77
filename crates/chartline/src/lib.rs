//! Chartline - static workflow charts rendered to SVG.
//!
//! A figure is a TOML document of absolutely positioned boxes, panels and
//! free text joined by straight and elbow arrows. This crate loads and
//! validates figures and renders them with the drawables of
//! [`chartline_core`].

pub mod config;
pub mod export;
pub mod figure;
pub mod figures;

mod error;

pub use chartline_core::{color, draw, geometry};

pub use error::ChartlineError;

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::SvgExporter;
use figure::Figure;

/// Builder for loading and rendering Chartline figures.
///
/// # Examples
///
/// ```rust
/// use chartline::{FigureBuilder, config::AppConfig, figures};
///
/// let builder = FigureBuilder::new(AppConfig::default());
///
/// // Parse figure source to the figure model
/// let figure = builder.parse(figures::ATS_WORKFLOW)
///     .expect("Failed to parse");
///
/// // Render the figure to SVG
/// let svg = builder.render_svg(&figure)
///     .expect("Failed to render");
/// assert!(svg.contains("Talent Pool"));
/// ```
#[derive(Debug, Default)]
pub struct FigureBuilder {
    config: AppConfig,
}

impl FigureBuilder {
    /// Create a new figure builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including style and arrow settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse TOML source into a validated figure.
    ///
    /// # Arguments
    ///
    /// * `source` - Figure source as a TOML string
    ///
    /// # Errors
    ///
    /// Returns [`ChartlineError::Figure`] for TOML syntax errors, schema
    /// mismatches and validation errors. The error keeps `source` so that
    /// syntax errors can be reported against it.
    pub fn parse(&self, source: &str) -> Result<Figure, ChartlineError> {
        info!("Parsing figure");

        let figure = Figure::from_toml(source)
            .map_err(|err| ChartlineError::new_figure_error(err, source))?;

        debug!(
            title = figure.title().unwrap_or_default(),
            nodes = figure.nodes().len();
            "Figure parsed successfully"
        );
        trace!(figure:?; "Parsed figure");

        Ok(figure)
    }

    /// Render a figure to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`ChartlineError::Export`] if a color in the configuration
    /// cannot be parsed or the figure cannot be drawn.
    pub fn render_svg(&self, figure: &Figure) -> Result<String, ChartlineError> {
        let canvas = figure.canvas();
        info!(width = canvas.width, height = canvas.height; "Rendering figure");

        let svg = SvgExporter::new(&self.config).render_string(figure)?;

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a figure and write the SVG document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartlineError::Export`] if the figure cannot be rendered or
    /// the file cannot be written.
    pub fn write_svg(
        &self,
        figure: &Figure,
        path: impl AsRef<Path>,
    ) -> Result<(), ChartlineError> {
        let exporter = SvgExporter::new(&self.config);
        let doc = exporter.render_document(figure)?;
        exporter.write_document(&doc, path)?;

        info!("SVG written successfully");
        Ok(())
    }
}
