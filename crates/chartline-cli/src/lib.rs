//! CLI logic for the Chartline figure tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use chartline::{ChartlineError, FigureBuilder, figures};

/// Run the Chartline CLI application
///
/// Loads the figure named by `args.input` (or the built-in ATS workflow
/// figure when no input is given), renders it and writes the SVG to
/// `args.output`.
///
/// # Errors
///
/// Returns `ChartlineError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Figure syntax and validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ChartlineError> {
    info!(
        input_path = args.input.as_deref().unwrap_or("<built-in>"),
        output_path = args.output;
        "Processing figure"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            info!("No input given, using the built-in ATS workflow figure");
            figures::ATS_WORKFLOW.to_string()
        }
    };

    let builder = FigureBuilder::new(app_config);
    let figure = builder.parse(&source)?;
    builder.write_svg(&figure, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
