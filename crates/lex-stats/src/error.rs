//! Error types for dataset loading, analysis and report rendering.
//!
//! The statistics engine itself never fails: malformed cells degrade into
//! smaller records instead. Everything here belongs to the collaborators
//! around it (loading, configuration, writing reports).
//!
//! Errors are serializable so they can be emitted as part of a JSON report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the statistics tool.
#[derive(Error, Debug)]
pub enum StatsError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dataset loaded without any data rows.
    #[error("No data found in '{}'", .0.display())]
    EmptyDataset(PathBuf),

    /// The dataset header did not contain any column.
    #[error("No columns found in '{}'", .0.display())]
    NoColumns(PathBuf),

    /// Every loading strategy failed for a CSV file.
    #[error("Failed to load CSV '{}': {reason}", .path.display())]
    CsvLoadFailed { path: PathBuf, reason: String },

    /// Report rendering or writing failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<StatsError>,
    },
}

impl StatsError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        StatsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message wording.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::NoColumns(_) => "NO_COLUMNS",
            Self::CsvLoadFailed { .. } => "CSV_LOAD_FAILED",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the input file itself is unusable (as opposed to an
    /// environment or rendering failure).
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::EmptyDataset(_) | Self::NoColumns(_) | Self::CsvLoadFailed { .. } => true,
            Self::WithContext { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for StatsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("StatsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, StatsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| StatsError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            StatsError::InvalidConfig("x".to_string()).error_code(),
            "INVALID_CONFIG"
        );
        assert_eq!(
            StatsError::EmptyDataset(PathBuf::from("ads.csv")).error_code(),
            "EMPTY_DATASET"
        );
    }

    #[test]
    fn test_is_input_error() {
        assert!(StatsError::NoColumns(PathBuf::from("a.csv")).is_input_error());
        assert!(
            StatsError::EmptyDataset(PathBuf::from("a.csv"))
                .with_context("Loading dataset")
                .is_input_error()
        );
        assert!(!StatsError::ReportGenerationFailed("disk full".to_string()).is_input_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = StatsError::EmptyDataset(PathBuf::from("ads.csv"));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("EMPTY_DATASET"));
        assert!(json.contains("ads.csv"));
    }

    #[test]
    fn test_with_context() {
        let error = StatsError::NoColumns(PathBuf::from("ads.csv")).with_context("During loading");
        assert!(error.to_string().contains("During loading"));
        assert_eq!(error.error_code(), "NO_COLUMNS");
    }
}
