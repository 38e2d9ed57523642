use crate::table::CellKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic type inferred for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Numeric,
    Datetime,
    Categorical,
    /// No non-missing values to classify.
    Unknown,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Datetime => "datetime",
            Self::Categorical => "categorical",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A frequent value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: usize,
}

/// Statistical summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub inferred_type: ColumnType,
    pub missing_count: usize,
    /// Missing values as a percentage of total rows.
    pub missing_percentage: f64,
    /// Distinct values, with all missing values counted as one.
    pub unique_values: usize,
    pub duplicate_count: usize,
    pub outliers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    /// Most frequent value including the missing marker. `None` only for
    /// zero-row tables.
    #[serde(default)]
    pub mode: Option<CellKey>,
    pub top_values: Vec<TopValue>,
}

/// Pairwise Pearson coefficients keyed by column name.
///
/// `None` marks a pair whose coefficient is undefined because a value in
/// either column failed numeric conversion.
pub type CorrelationMatrix = BTreeMap<String, BTreeMap<String, Option<f64>>>;

/// The four weighted components of the quality score, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub missing_score: f64,
    pub duplicate_score: f64,
    pub outlier_score: f64,
    pub type_score: f64,
}

/// Complete quality report for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns_analysis: Vec<ColumnProfile>,
    pub duplicate_rows: usize,
    /// Composite score, 0-100.
    pub quality_score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub correlation_matrix: CorrelationMatrix,
    /// Header row followed by the first data rows, stringified.
    pub preview_data: Vec<Vec<String>>,
}

impl QualityReport {
    /// Names of the columns typed `numeric`, in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns_analysis
            .iter()
            .filter(|col| col.inferred_type == ColumnType::Numeric)
            .map(|col| col.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns_analysis.iter().find(|col| col.name == name)
    }

    /// Coefficient for a pair of numeric columns.
    pub fn correlation(&self, a: &str, b: &str) -> Option<f64> {
        self.correlation_matrix.get(a)?.get(b).copied().flatten()
    }
}

// ============================================================================
// Tests
// ============================================================================
