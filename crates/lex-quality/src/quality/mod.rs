//! Table-level quality analysis.
//!
//! This module combines column profiles with table-wide checks:
//! - Pairwise correlation of numeric columns
//! - Whole-row duplicate detection
//! - The weighted composite quality score
//!
//! [`DataQualityAnalyzer`] sequences all of them into a [`QualityReport`](crate::QualityReport).

mod analyzer;
mod correlation;
mod duplicates;
mod scorer;

pub use analyzer::DataQualityAnalyzer;
pub use correlation::{correlation_matrix, pearson};
pub use duplicates::count_duplicate_rows;
pub use scorer::{QualityScore, QualityScorer};
