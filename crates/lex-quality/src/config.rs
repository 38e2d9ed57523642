//! Configuration types for the quality analysis engine.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic analyzer setup.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that the score weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights of the four sub-scores that make up the composite quality score.
///
/// The weights must sum to 1.0. They are applied as given, never renormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    /// Weight of the missing-data score. Default: 0.3
    pub missing: f64,
    /// Weight of the duplicate-row score. Default: 0.3
    pub duplicates: f64,
    /// Weight of the outlier score. Default: 0.2
    pub outliers: f64,
    /// Weight of the type-resolution score. Default: 0.2
    pub types: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            missing: 0.3,
            duplicates: 0.3,
            outliers: 0.2,
            types: 0.2,
        }
    }
}

impl QualityWeights {
    /// Sum of all four weights.
    pub fn total(&self) -> f64 {
        self.missing + self.duplicates + self.outliers + self.types
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        let fields = [
            ("weights.missing", self.missing),
            ("weights.duplicates", self.duplicates),
            ("weights.outliers", self.outliers),
            ("weights.types", self.types),
        ];
        for (field, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigValidationError::WeightsDoNotSumToOne(total));
        }

        Ok(())
    }
}

/// Configuration for the quality analyzer.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .numeric_threshold(0.9)
///     .iqr_multiplier(3.0)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Share of non-missing values that must parse as numbers for a column
    /// to be typed `numeric` (strictly greater than). Default: 0.8
    pub numeric_threshold: f64,

    /// Share of non-missing values that must parse as calendar dates for a
    /// column to be typed `datetime` (strictly greater than). Default: 0.8
    pub datetime_threshold: f64,

    /// Multiplier applied to the IQR when computing outlier bounds.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Maximum number of most frequent values kept per column. Default: 3
    pub top_values_limit: usize,

    /// Number of data rows included in the report preview. Default: 3
    pub preview_rows: usize,

    /// Composite score weights.
    pub weights: QualityWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            numeric_threshold: 0.8,
            datetime_threshold: 0.8,
            iqr_multiplier: 1.5,
            top_values_limit: 3,
            preview_rows: 3,
            weights: QualityWeights::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.numeric_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "numeric_threshold".to_string(),
                value: self.numeric_threshold,
            });
        }

        if !(0.0..=1.0).contains(&self.datetime_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "datetime_threshold".to_string(),
                value: self.datetime_threshold,
            });
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        if self.top_values_limit == 0 {
            return Err(ConfigValidationError::InvalidTopValues(
                self.top_values_limit,
            ));
        }

        self.weights.validate()
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid IQR multiplier: {0} (must be a finite, non-negative number)")]
    InvalidIqrMultiplier(f64),

    #[error("Invalid top values limit: {0} (must be at least 1)")]
    InvalidTopValues(usize),

    #[error("Quality weights sum to {0}, expected 1.0")]
    WeightsDoNotSumToOne(f64),
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    numeric_threshold: Option<f64>,
    datetime_threshold: Option<f64>,
    iqr_multiplier: Option<f64>,
    top_values_limit: Option<usize>,
    preview_rows: Option<usize>,
    weights: Option<QualityWeights>,
}

impl AnalysisConfigBuilder {
    /// Set the numeric classification threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.8 = 80%)
    pub fn numeric_threshold(mut self, threshold: f64) -> Self {
        self.numeric_threshold = Some(threshold);
        self
    }

    /// Set the datetime classification threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.8 = 80%)
    pub fn datetime_threshold(mut self, threshold: f64) -> Self {
        self.datetime_threshold = Some(threshold);
        self
    }

    /// Set the IQR multiplier used for outlier bounds.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set how many top values are kept per column.
    pub fn top_values_limit(mut self, limit: usize) -> Self {
        self.top_values_limit = Some(limit);
        self
    }

    /// Set how many data rows the preview holds.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Set the composite score weights.
    pub fn weights(mut self, weights: QualityWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            numeric_threshold: self.numeric_threshold.unwrap_or(defaults.numeric_threshold),
            datetime_threshold: self
                .datetime_threshold
                .unwrap_or(defaults.datetime_threshold),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(defaults.iqr_multiplier),
            top_values_limit: self.top_values_limit.unwrap_or(defaults.top_values_limit),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            weights: self.weights.unwrap_or(defaults.weights),
        };

        config.validate()?;
        Ok(config)
    }
}
