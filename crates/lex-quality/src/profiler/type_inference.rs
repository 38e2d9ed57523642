//! Type inference logic for column analysis.

use crate::config::AnalysisConfig;
use crate::table::Value;
use crate::types::ColumnType;

/// Classify a column from its raw values.
///
/// Missing values are ignored. A column with nothing else is `Unknown`.
/// Otherwise the column is `Numeric` when the share of values parsing as
/// numbers exceeds `numeric_threshold`, else `Datetime` when the share of
/// valid calendar dates exceeds `datetime_threshold`, else `Categorical`.
/// The numeric check runs first, so it wins when both shares pass.
pub(crate) fn infer_column_type<'a>(
    values: impl IntoIterator<Item = &'a Value>,
    config: &AnalysisConfig,
) -> ColumnType {
    let mut present = 0usize;
    let mut numeric = 0usize;
    let mut dates = 0usize;

    for value in values {
        if value.is_missing() {
            continue;
        }
        present += 1;
        if value.as_number().is_some() {
            numeric += 1;
        } else if value.is_date() {
            dates += 1;
        }
    }

    if present == 0 {
        return ColumnType::Unknown;
    }

    let total = present as f64;
    if numeric as f64 / total > config.numeric_threshold {
        ColumnType::Numeric
    } else if dates as f64 / total > config.datetime_threshold {
        ColumnType::Datetime
    } else {
        ColumnType::Categorical
    }
}
