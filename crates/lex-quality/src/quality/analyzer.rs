use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::profiler::ColumnProfiler;
use crate::quality::correlation::correlation_matrix;
use crate::quality::duplicates::count_duplicate_rows;
use crate::quality::scorer::QualityScorer;
use crate::table::{Table, Value};
use crate::types::{ColumnProfile, ColumnType, QualityReport};
use polars::prelude::DataFrame;
use std::thread;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the full quality analysis over a table.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::{AnalysisConfig, DataQualityAnalyzer, Table};
///
/// let analyzer = DataQualityAnalyzer::new(
///     AnalysisConfig::builder().iqr_multiplier(3.0).build()?,
/// )?;
/// let report = analyzer.analyze(&table);
/// println!("score: {}", report.quality_score);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataQualityAnalyzer {
    config: AnalysisConfig,
}

static_assertions::assert_impl_all!(DataQualityAnalyzer: Send, Sync);
static_assertions::assert_impl_all!(QualityReport: Send, Sync);

impl DataQualityAnalyzer {
    /// Create an analyzer, validating the configuration first.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a validated table.
    ///
    /// Shape problems are rejected when the [`Table`] is built, so once a
    /// table exists the analysis always yields a complete report.
    pub fn analyze(&self, table: &Table) -> QualityReport {
        let start = Instant::now();
        let total_rows = table.row_count();

        if total_rows == 0 {
            warn!(
                columns = table.column_count(),
                "Table has no data rows; reporting the empty-table score"
            );
        }

        let profiler = ColumnProfiler::new(&self.config);
        let columns_analysis: Vec<ColumnProfile> =
            table.columns().map(|column| profiler.profile(column)).collect();

        let numeric = table.columns().zip(&columns_analysis).filter_map(|(column, profile)| {
            (profile.inferred_type == ColumnType::Numeric).then_some(column)
        });
        let correlation_matrix = correlation_matrix(numeric);

        let duplicate_rows = count_duplicate_rows(table.rows());
        let score = QualityScorer::new(self.config.weights).score(
            &columns_analysis,
            total_rows,
            duplicate_rows,
        );
        debug!(breakdown = ?score.breakdown, "Scored table");

        let report = QualityReport {
            total_rows,
            total_columns: table.column_count(),
            columns_analysis,
            duplicate_rows,
            quality_score: score.composite,
            score_breakdown: score.breakdown,
            correlation_matrix,
            preview_data: self.preview(table),
        };

        info!(
            rows = report.total_rows,
            columns = report.total_columns,
            duplicate_rows = report.duplicate_rows,
            quality_score = report.quality_score,
            duration_ms = start.elapsed().as_millis() as u64,
            "Quality analysis completed"
        );

        report
    }

    /// Validate raw rows against a header, then analyze them.
    ///
    /// Fails with [`AnalysisError::MalformedInput`](crate::AnalysisError::MalformedInput)
    /// before any profiling when the shape is invalid; no partial report is
    /// ever produced.
    pub fn analyze_rows(&self, header: Vec<String>, rows: Vec<Vec<Value>>) -> Result<QualityReport> {
        let table = Table::new(header, rows)?;
        Ok(self.analyze(&table))
    }

    /// Convert a polars `DataFrame` and analyze it.
    pub fn analyze_dataframe(&self, df: &DataFrame) -> Result<QualityReport> {
        let table = Table::from_dataframe(df)?;
        Ok(self.analyze(&table))
    }

    /// Analyze independent tables concurrently, one thread per table.
    ///
    /// Reports come back in input order and are never merged.
    pub fn analyze_many(&self, tables: &[Table]) -> Vec<QualityReport> {
        if tables.len() <= 1 {
            return tables.iter().map(|table| self.analyze(table)).collect();
        }

        thread::scope(|scope| {
            let handles: Vec<_> = tables
                .iter()
                .map(|table| scope.spawn(move || self.analyze(table)))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(report) => report,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    /// Header followed by the first `preview_rows` data rows, stringified.
    fn preview(&self, table: &Table) -> Vec<Vec<String>> {
        std::iter::once(table.header().to_vec())
            .chain(
                table
                    .rows()
                    .iter()
                    .take(self.config.preview_rows)
                    .map(|row| row.iter().map(Value::display).collect()),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;
    use crate::table::CellKey;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn rows(raw: &[&[&str]]) -> Vec<Vec<Value>> {
        raw.iter()
            .map(|row| row.iter().map(|s| Value::from(*s)).collect())
            .collect()
    }

    fn id_score_table() -> Table {
        Table::new(
            header(&["id", "score"]),
            rows(&[&["1", "10"], &["2", "20"], &["3", "30"], &["2", "1000"]]),
        )
        .unwrap()
    }

    // ==================== analyze tests ====================

    #[test]
    fn test_analyze_id_score_scenario() {
        let report = DataQualityAnalyzer::with_defaults().analyze(&id_score_table());

        assert_eq!(report.total_rows, 4);
        assert_eq!(report.total_columns, 2);
        assert_eq!(report.duplicate_rows, 0);

        let id = report.column("id").unwrap();
        assert_eq!(id.inferred_type, ColumnType::Numeric);
        assert_eq!(id.unique_values, 3);
        assert_eq!(id.duplicate_count, 1);

        // Q3 = sorted[3] = 1000 on four values, so nothing lies beyond the bound
        let score = report.column("score").unwrap();
        assert_eq!(score.inferred_type, ColumnType::Numeric);
        assert_eq!(score.outliers, 0);
    }

    #[test]
    fn test_analyze_correlation_covers_numeric_columns_only() {
        let table = Table::new(
            header(&["a", "label", "b"]),
            rows(&[&["1", "x", "2"], &["2", "y", "4"], &["3", "z", "6"]]),
        )
        .unwrap();
        let report = DataQualityAnalyzer::with_defaults().analyze(&table);

        assert_eq!(report.correlation_matrix.len(), 2);
        assert!(!report.correlation_matrix.contains_key("label"));
        assert_eq!(report.correlation("a", "b"), Some(1.0));
    }

    #[test]
    fn test_analyze_preview_header_plus_three_rows() {
        let table = Table::new(
            header(&["n", "t"]),
            vec![
                vec![Value::Number(1.0), Value::from("a")],
                vec![Value::Number(2.5), Value::Null],
                vec![Value::Number(3.0), Value::from("c")],
                vec![Value::Number(4.0), Value::from("d")],
            ],
        )
        .unwrap();
        let report = DataQualityAnalyzer::with_defaults().analyze(&table);

        assert_eq!(
            report.preview_data,
            vec![
                vec!["n".to_string(), "t".to_string()],
                vec!["1".to_string(), "a".to_string()],
                vec!["2.5".to_string(), "".to_string()],
                vec!["3".to_string(), "c".to_string()],
            ]
        );
    }

    #[test]
    fn test_analyze_preview_respects_config() {
        let config = AnalysisConfig::builder().preview_rows(1).build().unwrap();
        let report = DataQualityAnalyzer::new(config).unwrap().analyze(&id_score_table());
        assert_eq!(report.preview_data.len(), 2);
    }

    #[test]
    fn test_analyze_zero_rows() {
        let table = Table::new(header(&["a", "b"]), vec![]).unwrap();
        let report = DataQualityAnalyzer::with_defaults().analyze(&table);

        assert_eq!(report.total_rows, 0);
        assert_eq!(report.quality_score, 0);
        assert_eq!(report.score_breakdown.missing_score, 0.0);
        assert_eq!(report.preview_data, vec![header(&["a", "b"])]);
        assert!(report.columns_analysis.iter().all(|c| c.missing_percentage == 0.0));
        assert!(report.correlation_matrix.is_empty());
    }

    #[test]
    fn test_analyze_all_missing_column() {
        let table = Table::new(
            header(&["notes", "n"]),
            rows(&[&["", "1"], &["", "2"], &["", "3"], &["", "4"]]),
        )
        .unwrap();
        let report = DataQualityAnalyzer::with_defaults().analyze(&table);
        let notes = report.column("notes").unwrap();

        assert_eq!(notes.inferred_type, ColumnType::Unknown);
        assert_eq!(notes.missing_percentage, 100.0);
        assert_eq!(notes.mode, Some(CellKey::Missing));
        assert_eq!(report.score_breakdown.type_score, 50.0);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = DataQualityAnalyzer::with_defaults();
        let table = id_score_table();
        assert_eq!(analyzer.analyze(&table), analyzer.analyze(&table));
    }

    // ==================== analyze_rows tests ====================

    #[test]
    fn test_analyze_rows_rejects_ragged_rows() {
        let result = DataQualityAnalyzer::with_defaults().analyze_rows(
            header(&["a", "b"]),
            rows(&[&["1", "2"], &["3"]]),
        );
        assert!(matches!(result, Err(AnalysisError::MalformedInput(_))));
    }

    #[test]
    fn test_analyze_rows_rejects_empty_header() {
        let result = DataQualityAnalyzer::with_defaults().analyze_rows(vec![], vec![]);
        assert!(result.unwrap_err().is_malformed_input());
    }

    // ==================== construction tests ====================

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AnalysisConfig {
            iqr_multiplier: -1.0,
            ..AnalysisConfig::default()
        };
        let err = DataQualityAnalyzer::new(config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    // ==================== analyze_many tests ====================

    #[test]
    fn test_analyze_many_keeps_input_order() {
        let first = id_score_table();
        let second = Table::new(header(&["c"]), rows(&[&["x"], &["x"]])).unwrap();
        let analyzer = DataQualityAnalyzer::with_defaults();

        let reports = analyzer.analyze_many(&[first.clone(), second.clone()]);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], analyzer.analyze(&first));
        assert_eq!(reports[1], analyzer.analyze(&second));
        assert_eq!(reports[1].duplicate_rows, 1);
    }

    #[test]
    fn test_analyze_many_empty() {
        assert!(DataQualityAnalyzer::with_defaults().analyze_many(&[]).is_empty());
    }
}
