use crate::error::Result;
use crate::types::QualityReport;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report File
// ============================================================================

/// A quality report together with where and when it was produced.
///
/// This is the unit written by `--emit-report` and printed by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReportFile {
    /// RFC 3339 timestamp, local time
    pub generated_at: String,
    /// Path of the analysed file as given on the command line
    pub input_file: String,
    pub report: QualityReport,
}

impl QualityReportFile {
    /// Wrap a report, stamping it with the current local time.
    pub fn new(input_file: impl Into<String>, report: QualityReport) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            input_file: input_file.into(),
            report,
        }
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Writes report files and renders the plain-text summary.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the report for `base_name` is written to.
    pub fn report_path(&self, base_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_quality_report.json", base_name))
    }

    /// Write a report as pretty-printed JSON, creating the output directory.
    ///
    /// For a `base_name` of "sales" the file is `sales_quality_report.json`.
    pub fn write_report_to_file(
        &self,
        report: &QualityReportFile,
        base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.report_path(base_name);
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }

    /// Render a human-readable summary of one report.
    pub fn render_text_summary(file: &QualityReportFile) -> String {
        let report = &file.report;
        let breakdown = &report.score_breakdown;
        let rule = "=".repeat(80);
        let thin = "-".repeat(40);
        let mut out = Vec::new();

        out.push(rule.clone());
        out.push("DATA QUALITY REPORT".to_string());
        out.push(rule.clone());
        out.push(format!("File:           {}", file.input_file));
        out.push(format!("Generated:      {}", file.generated_at));
        out.push(format!("Total Rows:     {}", report.total_rows));
        out.push(format!("Total Columns:  {}", report.total_columns));
        out.push(format!("Quality Score:  {}%", report.quality_score));
        out.push(format!("Duplicate Rows: {}", report.duplicate_rows));
        out.push(String::new());

        out.push("SCORE BREAKDOWN".to_string());
        out.push(thin.clone());
        out.push(format!("  Missing data:    {:.1}", breakdown.missing_score));
        out.push(format!("  Duplicate rows:  {:.1}", breakdown.duplicate_score));
        out.push(format!("  Outliers:        {:.1}", breakdown.outlier_score));
        out.push(format!("  Type resolution: {:.1}", breakdown.type_score));
        out.push(String::new());

        out.push("COLUMN ANALYSIS".to_string());
        out.push(thin.clone());
        out.push(format!(
            "{:<20} {:<12} {:<16} {:<8} {:<9} {}",
            "Column", "Type", "Missing", "Unique", "Outliers", "Top Values"
        ));
        out.push("-".repeat(80));
        for col in &report.columns_analysis {
            let top = col
                .top_values
                .iter()
                .map(|v| format!("{}: {}", v.value, v.count))
                .collect::<Vec<_>>()
                .join(", ");
            out.push(format!(
                "{:<20} {:<12} {:<16} {:<8} {:<9} {}",
                truncate_str(&col.name, 19),
                col.inferred_type,
                format!("{} ({:.1}%)", col.missing_count, col.missing_percentage),
                col.unique_values,
                col.outliers,
                top
            ));
        }
        out.push(String::new());

        if !report.correlation_matrix.is_empty() {
            out.push("CORRELATIONS".to_string());
            out.push(thin.clone());
            for (a, row) in &report.correlation_matrix {
                // each unordered pair once
                for (b, coefficient) in row.range::<str, _>((
                    std::ops::Bound::Excluded(a.as_str()),
                    std::ops::Bound::Unbounded,
                )) {
                    let value = coefficient
                        .map_or_else(|| "undefined".to_string(), |r| format!("{:.3}", r));
                    out.push(format!("  {} ~ {}: {}", a, b, value));
                }
            }
            out.push(String::new());
        }

        if let Some((header, rows)) = report.preview_data.split_first() {
            out.push(format!("DATA PREVIEW (First {} Rows)", rows.len()));
            out.push(thin);
            out.push(header.join(" | "));
            for row in rows {
                out.push(row.join(" | "));
            }
        }
        out.push(rule);

        out.join("\n")
    }
}

/// Truncate a string to `max_len` characters, ending in "..." when cut.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::DataQualityAnalyzer;
    use crate::table::{Table, Value};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn sample_file() -> QualityReportFile {
        let table = Table::new(
            vec!["id".to_string(), "amount".to_string(), "city".to_string()],
            vec![
                vec![Value::from("1"), Value::from("10"), Value::from("Paris")],
                vec![Value::from("2"), Value::from("20"), Value::from("")],
                vec![Value::from("3"), Value::from("35"), Value::from("Paris")],
                vec![Value::from("4"), Value::from("40"), Value::from("Oslo")],
            ],
        )
        .unwrap();
        let report = DataQualityAnalyzer::with_defaults().analyze(&table);
        QualityReportFile::new("data/sales.csv", report)
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("lex_quality_{}_{}", tag, nanos))
    }

    #[test]
    fn test_report_file_json_shape() {
        let json = serde_json::to_value(sample_file()).unwrap();
        assert_eq!(json["inputFile"], "data/sales.csv");
        assert!(json["generatedAt"].as_str().unwrap().contains('T'));
        assert_eq!(json["report"]["totalRows"], 4);
        assert_eq!(json["report"]["columnsAnalysis"][2]["type"], "categorical");
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = temp_dir("write");
        let generator = ReportGenerator::new(&dir);
        let file = sample_file();

        let path = generator.write_report_to_file(&file, "sales").unwrap();
        assert_eq!(path, dir.join("sales_quality_report.json"));

        let written: QualityReportFile =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.report.total_rows, file.report.total_rows);
        assert_eq!(written.report.quality_score, file.report.quality_score);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_text_summary_sections() {
        let text = ReportGenerator::render_text_summary(&sample_file());

        assert!(text.contains("File:           data/sales.csv"));
        assert!(text.contains("Total Rows:     4"));
        assert!(text.contains("COLUMN ANALYSIS"));
        assert!(text.contains("Paris: 2"));
        assert!(text.contains("1 (25.0%)"));
        assert!(text.contains("amount ~ id: 0.984"));
        assert!(text.contains("DATA PREVIEW (First 3 Rows)"));
        assert!(text.contains("id | amount | city"));
    }

    #[test]
    fn test_render_text_summary_lists_each_pair_once() {
        let text = ReportGenerator::render_text_summary(&sample_file());
        assert!(!text.contains("id ~ amount"));
        assert!(!text.contains("id ~ id"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
        assert_eq!(truncate_str("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(ReportGenerator::default().output_dir(), Path::new("./outputs"));
    }
}
