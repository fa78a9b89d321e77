//! Error adapter for converting ChartlineError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Figure errors keep
//! the figure source, so TOML syntax errors are shown with the offending span.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use chartline::{ChartlineError, figure::FigureError};

/// Adapter for a figure loading or validation error.
pub struct FigureDiagnostic<'a> {
    err: &'a FigureError,
    /// Source code for displaying snippets
    src: &'a str,
}

impl<'a> FigureDiagnostic<'a> {
    pub fn new(err: &'a FigureError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for FigureDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for FigureDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for FigureDiagnostic<'_> {}

impl MietteDiagnostic for FigureDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.err {
            FigureError::Syntax { .. } => "chartline::figure::syntax",
            FigureError::InvalidCanvas { .. } => "chartline::figure::canvas",
            FigureError::InvalidSize { .. } => "chartline::figure::size",
            FigureError::UnknownRole { .. } => "chartline::figure::role",
            FigureError::InvalidColor { .. } => "chartline::figure::color",
            FigureError::NonFiniteCoordinate { .. } => "chartline::figure::coordinate",
            FigureError::Arrow { .. } | FigureError::MissingLabelAnchor { .. } => {
                "chartline::figure::arrow"
            }
            FigureError::EmptyNode { .. } => "chartline::figure::node",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            FigureError::UnknownRole { role, .. } => {
                format!("declare the role in a `[palette.{role}]` table")
            }
            FigureError::MissingLabelAnchor { .. } => {
                "elbow labels are not placed automatically; add `label_at = [x, y]`".to_string()
            }
            FigureError::Arrow { .. } => {
                "an elbow arrow needs a start point and an end point".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let FigureError::Syntax {
            span: Some(span), ..
        } = self.err
        else {
            return None;
        };

        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for non-figure [`ChartlineError`] variants.
pub struct ErrorAdapter<'a>(pub &'a ChartlineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChartlineError::Io(_) => "chartline::io",
            ChartlineError::Figure { .. } => "chartline::figure",
            ChartlineError::Config(_) => "chartline::config",
            ChartlineError::Export(_) => "chartline::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A figure error with its source text.
    Diagnostic(FigureDiagnostic<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`ChartlineError`] into a reportable error.
pub fn to_reportable(err: &ChartlineError) -> Reportable<'_> {
    match err {
        ChartlineError::Figure { err, src } => {
            Reportable::Diagnostic(FigureDiagnostic::new(err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
