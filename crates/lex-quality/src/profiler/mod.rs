//! Column profiling.
//!
//! This module provides functionality for profiling single columns:
//! - Type inference
//! - Missingness and cardinality
//! - Central tendency and IQR outliers for numeric columns
//! - Mode and most frequent values

mod frequency;
mod statistics;
mod type_inference;

use crate::config::AnalysisConfig;
use crate::table::Column;
use crate::types::{ColumnProfile, ColumnType, TopValue};
use crate::utils::percentage;
use tracing::debug;

pub use frequency::FrequencyTable;
pub(crate) use statistics::{count_outliers, summarize};
pub(crate) use type_inference::infer_column_type;

/// Column profiler producing complete, immutable [`ColumnProfile`]s.
#[derive(Debug, Clone, Copy)]
pub struct ColumnProfiler<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> ColumnProfiler<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Profile one column. Percentages are relative to the table's row count.
    pub fn profile(&self, column: Column<'_>) -> ColumnProfile {
        let total_rows = column.len();
        let inferred_type = infer_column_type(column.values(), self.config);

        let frequencies = FrequencyTable::from_values(column.values());
        let missing_count = column.values().filter(|v| v.is_missing()).count();
        let unique_values = frequencies.distinct();

        // Missing cells and failed conversions are not part of the numeric population.
        let (outliers, mean, median) = if inferred_type == ColumnType::Numeric {
            let population: Vec<f64> = column.values().filter_map(|v| v.as_number()).collect();
            let summary = summarize(&population);
            (
                count_outliers(&population, self.config.iqr_multiplier),
                summary.map(|s| s.mean),
                summary.map(|s| s.median),
            )
        } else {
            (0, None, None)
        };

        let top_values = frequencies
            .top_present(self.config.top_values_limit)
            .into_iter()
            .map(|(value, count)| TopValue {
                value: value.to_string(),
                count,
            })
            .collect();

        let profile = ColumnProfile {
            name: column.name().to_string(),
            inferred_type,
            missing_count,
            missing_percentage: percentage(missing_count, total_rows),
            unique_values,
            duplicate_count: total_rows - unique_values,
            outliers,
            mean,
            median,
            mode: frequencies.mode().map(|(key, _)| key.clone()),
            top_values,
        };

        debug!(
            column = %profile.name,
            inferred_type = %profile.inferred_type,
            missing = profile.missing_count,
            unique = profile.unique_values,
            outliers = profile.outliers,
            "Profiled column"
        );

        profile
    }
}
