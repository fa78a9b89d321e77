//! Error types for Chartline operations.
//!
//! This module provides the main error type [`ChartlineError`] which wraps
//! the error conditions that can occur while loading and rendering a figure.

use std::io;

use thiserror::Error;

use crate::{export, figure::FigureError};

/// The main error type for Chartline operations.
///
/// # Diagnostic Variants
///
/// The `Figure` variant keeps the figure source next to the error so a
/// [`FigureError::Syntax`] span can be shown against the original text.
#[derive(Debug, Error)]
pub enum ChartlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Figure { err: FigureError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),
}

impl ChartlineError {
    /// Create a new `Figure` error with the associated source text.
    pub fn new_figure_error(err: FigureError, src: impl Into<String>) -> Self {
        Self::Figure {
            err,
            src: src.into(),
        }
    }
}
