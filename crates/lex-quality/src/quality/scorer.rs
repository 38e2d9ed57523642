//! Composite quality scoring.

use crate::config::QualityWeights;
use crate::types::{ColumnProfile, ColumnType, ScoreBreakdown};
use crate::utils::{mean, percentage};

/// Composite score together with the sub-scores it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScore {
    /// Weighted sum rounded and clamped to 0-100.
    pub composite: u8,
    pub breakdown: ScoreBreakdown,
}

impl QualityScore {
    /// Score reported for a table without data rows.
    ///
    /// Every sub-score is a percentage of the row count, so none is defined;
    /// all of them and the composite are reported as 0.
    pub const EMPTY: QualityScore = QualityScore {
        composite: 0,
        breakdown: ScoreBreakdown {
            missing_score: 0.0,
            duplicate_score: 0.0,
            outlier_score: 0.0,
            type_score: 0.0,
        },
    };
}

/// Combines column profiles and the duplicate row count into one score.
#[derive(Debug, Clone, Copy)]
pub struct QualityScorer {
    weights: QualityWeights,
}

impl QualityScorer {
    pub fn new(weights: QualityWeights) -> Self {
        Self { weights }
    }

    pub fn score(
        &self,
        profiles: &[ColumnProfile],
        total_rows: usize,
        duplicate_rows: usize,
    ) -> QualityScore {
        if total_rows == 0 {
            return QualityScore::EMPTY;
        }

        let missing: Vec<f64> = profiles.iter().map(|p| p.missing_percentage).collect();
        let outliers: Vec<f64> = profiles
            .iter()
            .map(|p| percentage(p.outliers, total_rows))
            .collect();
        let unknown = profiles
            .iter()
            .filter(|p| p.inferred_type == ColumnType::Unknown)
            .count();

        let breakdown = ScoreBreakdown {
            missing_score: 100.0 - mean(&missing).unwrap_or(0.0),
            duplicate_score: 100.0 - percentage(duplicate_rows, total_rows),
            outlier_score: 100.0 - mean(&outliers).unwrap_or(0.0),
            type_score: 100.0 - percentage(unknown, profiles.len()),
        };

        let weighted = self.weights.missing * breakdown.missing_score
            + self.weights.duplicates * breakdown.duplicate_score
            + self.weights.outliers * breakdown.outlier_score
            + self.weights.types * breakdown.type_score;

        QualityScore {
            composite: weighted.round().clamp(0.0, 100.0) as u8,
            breakdown,
        }
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new(QualityWeights::default())
    }
}
