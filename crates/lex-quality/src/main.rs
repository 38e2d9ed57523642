//! CLI entry point for the data quality analyzer.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use lex_quality::{
    AnalysisConfig, DataQualityAnalyzer, QualityReportFile, ReportGenerator, Table,
    check_record_arity,
};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Data Quality Analyzer for tabular datasets",
    long_about = "Profiles CSV files and reports per-column statistics, outliers, duplicates,\n\
                  correlations and a composite 0-100 quality score.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  RUST_LOG              Log filter (overrides --log-level)\n\n\
                  EXAMPLES:\n  \
                  # Analyze one file\n  \
                  lex-quality -i data.csv\n\n  \
                  # Analyze several files and save a JSON report for each\n  \
                  lex-quality -i sales.csv -i customers.csv -r -o reports/\n\n  \
                  # Machine-readable output\n  \
                  lex-quality -i data.csv --json | jq '.[0].report.qualityScore'"
)]
struct Args {
    /// Path to a CSV file to analyze (repeat for several files)
    #[arg(short, long, required = true)]
    input: Vec<String>,

    /// Output directory for reports
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long)]
    quiet: bool,

    /// Share of values that must be numeric to type a column numeric (0.0 - 1.0)
    #[arg(long, default_value = "0.8")]
    numeric_threshold: f64,

    /// Share of values that must be dates to type a column datetime (0.0 - 1.0)
    #[arg(long, default_value = "0.8")]
    datetime_threshold: f64,

    /// IQR multiplier for outlier bounds
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Number of most frequent values reported per column
    #[arg(long, default_value = "3")]
    top_values: usize,

    /// Number of data rows included in the preview
    #[arg(long, default_value = "3")]
    preview_rows: usize,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs a JSON array with one
    /// report per successfully analyzed file.
    #[arg(long)]
    json: bool,

    /// Write a JSON report per input to the output directory
    ///
    /// Reports are saved as <input_name>_quality_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load environment variables from .env file before reading RUST_LOG
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .numeric_threshold(args.numeric_threshold)
        .datetime_threshold(args.datetime_threshold)
        .iqr_multiplier(args.iqr_multiplier)
        .top_values_limit(args.top_values)
        .preview_rows(args.preview_rows)
        .build()?;
    let analyzer = DataQualityAnalyzer::new(config)?;

    let (loaded, failed) = load_tables(&args.input);
    let (names, tables): (Vec<&str>, Vec<Table>) = loaded.into_iter().unzip();

    info!("Analyzing {} file(s)...", tables.len());
    let reports: Vec<QualityReportFile> = names
        .into_iter()
        .zip(analyzer.analyze_many(&tables))
        .map(|(name, report)| QualityReportFile::new(name, report))
        .collect();

    handle_output(&reports, &args)?;

    check_failures(failed, args.input.len())
}

/// Load every input, reporting each failure on stderr.
///
/// Loading is the only step that can fail; a bad file never stops the
/// others. Returns the loaded tables in input order and the failure count.
fn load_tables(inputs: &[String]) -> (Vec<(&str, Table)>, usize) {
    let mut loaded = Vec::with_capacity(inputs.len());
    let mut failed = 0usize;

    for input in inputs {
        match load_table(input) {
            Ok(table) => loaded.push((input.as_str(), table)),
            Err(e) => {
                error!("Loading {} failed: {:#}", input, e);
                eprintln!("analysis failed for file {}: {:#}", input, e);
                failed += 1;
            }
        }
    }

    (loaded, failed)
}

/// Turn the failure count into the process outcome.
fn check_failures(failed: usize, total: usize) -> Result<()> {
    if failed > 0 {
        return Err(anyhow!(
            "analysis failed for {} of {} file(s)",
            failed,
            total
        ));
    }
    Ok(())
}

/// Handle analysis output based on CLI flags.
///
/// Output behavior:
/// - Default: Print a human-readable summary per file to stdout
/// - `--json`: Print a JSON array to stdout only (no logs)
/// - `--emit-report`: Write one JSON report per file
fn handle_output(reports: &[QualityReportFile], args: &Args) -> Result<()> {
    if args.emit_report {
        let generator = ReportGenerator::new(PathBuf::from(&args.output));
        for report in reports {
            let stem = extract_file_stem(&report.input_file);
            let path = generator
                .write_report_to_file(report, &stem)
                .with_context(|| format!("writing report for {}", report.input_file))?;
            info!("Report written to: {}", path.display());
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }

    for report in reports {
        println!();
        println!("{}", ReportGenerator::render_text_summary(report));
    }

    if !reports.is_empty() {
        println!("Use --json for machine-readable output");
        if !args.emit_report {
            println!("Use --emit-report to save a JSON report per file");
        }
    }

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Load a CSV file into a validated table.
fn load_table(path: &str) -> Result<Table> {
    if !Path::new(path).exists() {
        return Err(anyhow!("Input file not found: {}", path));
    }

    info!("Loading dataset from: {}", path);
    let df = load_csv_with_fallbacks(path)?;
    info!("Dataset loaded successfully: {:?}", df.shape());

    Table::from_dataframe(&df).with_context(|| format!("converting {}", path))
}

/// Options shared by every loading strategy.
///
/// Schema inference is disabled so every cell arrives as raw text; typing is
/// the analyzer's job.
fn base_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_infer_schema_length(Some(0))
        .with_has_header(true)
}

/// Load CSV with multiple fallback strategies.
///
/// The reader pads short records with nulls, so whichever strategy parses
/// the file, its records are then checked against the header's field count
/// with the same quoting. A ragged file fails rather than gaining invented
/// missing cells.
fn load_csv_with_fallbacks(path: &str) -> Result<DataFrame> {
    let raw = std::fs::read(path).with_context(|| format!("Could not read file: {}", path))?;

    // Strategy 1: Standard loading with quote handling
    match base_read_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => {
            check_record_arity(&raw, Some(b'"'))?;
            return Ok(df);
        }
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    // Strategy 2: Without quote handling
    match base_read_options()
        .with_parse_options(CsvParseOptions::default().with_quote_char(None))
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => {
            check_record_arity(&raw, None)?;
            return Ok(df);
        }
        Err(e) => {
            debug!("Loading without quotes failed: {}", e);
        }
    }

    // Strategy 3: Pre-clean content
    let cleaned = clean_csv_content(&String::from_utf8_lossy(&raw));
    check_record_arity(cleaned.as_bytes(), Some(b'"'))?;

    base_read_options()
        .into_reader_with_file_handle(std::io::Cursor::new(cleaned))
        .finish()
        .map_err(|e| anyhow!("Failed to parse {} as CSV: {}", path, e))
}

/// Collapse tripled quotes and drop blank lines.
///
/// A doubled quote is left alone: `""` is an empty quoted field.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_file_stem() {
        assert_eq!(extract_file_stem("data/sales.csv"), "sales");
        assert_eq!(extract_file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(extract_file_stem(""), "output");
    }

    #[test]
    fn test_clean_csv_content() {
        let raw = "a,b\n\n\"\"\"x\"\"\",1\n   \n";
        assert_eq!(clean_csv_content(raw), "a,b\n\"x\",1");
    }

    #[test]
    fn test_clean_csv_content_keeps_empty_quoted_field() {
        assert_eq!(clean_csv_content("a,b,c\n1,\"\",3\n"), "a,b,c\n1,\"\",3");
    }

    // ===== loading tests =====

    fn fixture(name: &str) -> String {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_load_table_fixture() {
        let table = load_table(&fixture("id_score.csv")).unwrap();
        assert_eq!(table.header(), ["id", "score"]);
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn test_load_table_missing_file() {
        let err = load_table(&fixture("does_not_exist.csv")).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_load_table_rejects_ragged_file() {
        let err = load_table(&fixture("ragged.csv")).unwrap_err();
        let analysis = err
            .downcast_ref::<lex_quality::AnalysisError>()
            .expect("ragged file should fail with an analysis error");
        assert!(analysis.is_malformed_input());
        assert!(err.to_string().contains("row 1 has 2 values, expected 3"));
    }

    #[test]
    fn test_load_tables_keeps_good_files() {
        let inputs = vec![
            fixture("id_score.csv"),
            fixture("does_not_exist.csv"),
            fixture("ragged.csv"),
            fixture("linear.csv"),
        ];

        let (loaded, failed) = load_tables(&inputs);

        assert_eq!(failed, 2);
        let names: Vec<&str> = loaded.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec![inputs[0].as_str(), inputs[3].as_str()]);
    }

    #[test]
    fn test_check_failures() {
        assert!(check_failures(0, 3).is_ok());
        let err = check_failures(2, 3).unwrap_err();
        assert_eq!(err.to_string(), "analysis failed for 2 of 3 file(s)");
    }

    #[test]
    fn test_args_parse_repeated_inputs() {
        let args = Args::parse_from(["lex-quality", "-i", "a.csv", "-i", "b.csv", "--json"]);
        assert_eq!(args.input, vec!["a.csv", "b.csv"]);
        assert!(args.json);
        assert_eq!(args.iqr_multiplier, 1.5);
        assert_eq!(args.output, "./outputs");
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["lex-quality"]).is_err());
    }
}
