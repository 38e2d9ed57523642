//! Data Quality Analysis Library
//!
//! A data-quality engine for tabular datasets built with Rust and Polars.
//!
//! # Overview
//!
//! Given a table, the engine produces a [`QualityReport`] containing:
//!
//! - **Type Inference**: each column classified as numeric, datetime, categorical or unknown
//! - **Column Profiles**: missingness, cardinality, duplicates, mean/median/mode, top values
//! - **Outlier Detection**: IQR bounds over the numeric population of each numeric column
//! - **Correlation**: pairwise Pearson coefficients across numeric columns
//! - **Duplicate Rows**: whole-row duplicate count
//! - **Quality Score**: a weighted 0-100 composite with its sub-scores
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_quality::{DataQualityAnalyzer, Table, Value};
//!
//! let table = Table::new(
//!     vec!["id".into(), "score".into()],
//!     vec![
//!         vec![Value::from("1"), Value::from("10")],
//!         vec![Value::from("2"), Value::from("20")],
//!     ],
//! )?;
//!
//! let report = DataQualityAnalyzer::with_defaults().analyze(&table);
//! println!("Quality score: {}", report.quality_score);
//! ```
//!
//! Tables can also be built from a polars `DataFrame` with
//! [`Table::from_dataframe`], or analysed directly with
//! [`DataQualityAnalyzer::analyze_dataframe`].
//!
//! # Configuration
//!
//! Use [`AnalysisConfig`] to adjust thresholds and weights:
//!
//! ```rust,ignore
//! use lex_quality::{AnalysisConfig, QualityWeights};
//!
//! let config = AnalysisConfig::builder()
//!     .numeric_threshold(0.9)       // >90% numeric values to type a column numeric
//!     .iqr_multiplier(3.0)          // wider outlier fences
//!     .top_values_limit(5)
//!     .weights(QualityWeights { missing: 0.4, duplicates: 0.2, outliers: 0.2, types: 0.2 })
//!     .build()?;
//! ```
//!
//! # Degenerate Input
//!
//! Tables with no columns, repeated column names, or rows whose arity
//! disagrees with the header are rejected with
//! [`AnalysisError::MalformedInput`]. A table with a header but no data rows
//! is analysed and reported with a quality score of 0.

pub mod config;
pub mod error;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod table;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, QualityWeights};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use profiler::{ColumnProfiler, FrequencyTable};
pub use quality::{DataQualityAnalyzer, QualityScore, QualityScorer};
pub use reporting::{QualityReportFile, ReportGenerator};
pub use table::{CellKey, Column, Table, Value, check_record_arity};
pub use types::{
    ColumnProfile, ColumnType, CorrelationMatrix, QualityReport, ScoreBreakdown, TopValue,
};
pub use utils::{is_date_string, parse_numeric_str};
