//! Report generation module.
//!
//! [`QualityReportFile`] wraps a [`QualityReport`](crate::QualityReport) with
//! its input path and a timestamp. It is used for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - The plain-text summary printed by default
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_quality::reporting::{QualityReportFile, ReportGenerator};
//!
//! let file = QualityReportFile::new("data/train.csv", report);
//! println!("{}", ReportGenerator::render_text_summary(&file));
//!
//! let generator = ReportGenerator::new("output");
//! generator.write_report_to_file(&file, "train")?; // output/train_quality_report.json
//! ```

mod generator;

pub use generator::{QualityReportFile, ReportGenerator};
