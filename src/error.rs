//! Error types for optim-plots.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while extracting series or rendering figures.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The requested algorithm key is not in the results container.
    #[error("unknown algorithm: {key}")]
    UnknownAlgorithm { key: String },

    /// The results array for a key holds no runs.
    #[error("no runs recorded for algorithm {key}")]
    NoRuns { key: String },

    /// The trailing field axis is shorter than the fixed layout.
    #[error("results for {key} have {found} fields, expected at least {expected}")]
    MissingFields {
        key: String,
        found: usize,
        expected: usize,
    },

    /// A specific run was requested past the end of the run axis.
    #[error("run {run} out of range for {key} ({runs} runs)")]
    RunOutOfRange { key: String, run: usize, runs: usize },

    /// A color bar was requested on a panel with nothing color-mapped.
    #[error("no color-mapped artist on the current axes to draw a color bar for")]
    NoColorMapping,

    /// Output path with an extension we cannot render to.
    #[error("unsupported output format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Failure reported by the plotters drawing layer.
    #[error("drawing error: {0}")]
    Drawing(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    pub fn unknown_algorithm(key: impl Into<String>) -> Self {
        Self::UnknownAlgorithm { key: key.into() }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Drawing(err.to_string())
    }
}
