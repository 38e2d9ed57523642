//! Custom error types for the data quality engine.
//!
//! Only malformed input is a hard failure. Values that fail numeric or date
//! conversion are absorbed by the profiler, and zero-row tables are resolved
//! by the scorer's sentinel policy, so neither has a variant here.
//!
//! Errors are serializable so they can be handed to a frontend or written
//! into a batch report as `{ code, message }`.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for quality analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The table cannot be analysed at all (no columns, duplicate column
    /// names, or rows whose arity disagrees with the header).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw CSV record could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MALFORMED_INPUT",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the input table itself was rejected.
    pub fn is_malformed_input(&self) -> bool {
        match self {
            Self::MalformedInput(_) => true,
            Self::WithContext { source, .. } => source.is_malformed_input(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for AnalysisError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        AnalysisError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

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
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalysisError::MalformedInput("no columns".to_string()).error_code(),
            "MALFORMED_INPUT"
        );
        assert_eq!(
            AnalysisError::ColumnNotFound("test".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_malformed_input() {
        assert!(AnalysisError::MalformedInput("x".to_string()).is_malformed_input());
        assert!(
            AnalysisError::MalformedInput("x".to_string())
                .with_context("orders.csv")
                .is_malformed_input()
        );
        assert!(!AnalysisError::InvalidConfig("x".to_string()).is_malformed_input());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalysisError::ColumnNotFound("Age".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("COLUMN_NOT_FOUND"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = AnalysisError::MalformedInput("row 3 has 2 values, expected 4".to_string())
            .with_context("Analysis failed for file data.csv");
        assert!(error.to_string().contains("data.csv"));
        assert!(error.to_string().contains("row 3"));
        assert_eq!(error.error_code(), "MALFORMED_INPUT");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AnalysisError = crate::config::ConfigValidationError::InvalidTopValues(0).into();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
