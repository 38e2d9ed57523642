//! Statistical functions for column profiling.
//!
//! All functions take the already-parsed numeric population of a column;
//! values that failed conversion never reach this module.

use crate::utils;

/// Central tendency of a numeric population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumericSummary {
    pub mean: f64,
    pub median: f64,
}

/// Sort a copy of the population ascending.
fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Mean and index-rule median, or `None` for an empty population.
///
/// The median is `sorted[floor(n / 2)]`: for even `n` the upper of the two
/// middle elements is taken rather than their average.
pub(crate) fn summarize(values: &[f64]) -> Option<NumericSummary> {
    let mean = utils::mean(values)?;
    let sorted = sorted(values);
    let median = sorted[sorted.len() / 2];
    Some(NumericSummary { mean, median })
}

/// IQR bounds `[Q1 - k*IQR, Q3 + k*IQR]` with Q1 and Q3 taken at indices
/// `floor(n * 0.25)` and `floor(n * 0.75)` of the sorted population.
pub(crate) fn iqr_bounds(values: &[f64], multiplier: f64) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let sorted = sorted(values);
    let n = sorted.len();
    let q1 = sorted[(n as f64 * 0.25) as usize];
    let q3 = sorted[(n as f64 * 0.75) as usize];
    let iqr = q3 - q1;

    Some((q1 - multiplier * iqr, q3 + multiplier * iqr))
}

/// Count values strictly outside the IQR bounds.
pub(crate) fn count_outliers(values: &[f64], multiplier: f64) -> usize {
    match iqr_bounds(values, multiplier) {
        Some((lower, upper)) => values
            .iter()
            .filter(|&&v| v < lower || v > upper)
            .count(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== summarize tests ====================

    #[test]
    fn test_summarize_odd_length() {
        let summary = summarize(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.median, 2.0);
    }

    #[test]
    fn test_summarize_even_length_uses_index_n_over_2() {
        // sorted [1, 2, 3, 4]; index 2 -> 3, not the 2.5 average
        let summary = summarize(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.mean, 2.5);
        assert_eq!(summary.median, 3.0);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
    }

    // ==================== iqr_bounds tests ====================

    #[test]
    fn test_iqr_bounds_index_rule() {
        // n = 4: Q1 = sorted[1] = 20, Q3 = sorted[3] = 1000, IQR = 980
        let (lower, upper) = iqr_bounds(&[10.0, 20.0, 30.0, 1000.0], 1.5).unwrap();
        assert_eq!(lower, 20.0 - 1470.0);
        assert_eq!(upper, 1000.0 + 1470.0);
    }

    #[test]
    fn test_iqr_bounds_empty() {
        assert!(iqr_bounds(&[], 1.5).is_none());
    }

    // ==================== count_outliers tests ====================

    #[test]
    fn test_count_outliers_with_outlier() {
        // n = 5: Q1 = 20, Q3 = 40, IQR = 20, bounds [-10, 70]
        assert_eq!(count_outliers(&[10.0, 20.0, 30.0, 40.0, 1000.0], 1.5), 1);
    }

    #[test]
    fn test_count_outliers_four_values_follow_index_rule() {
        // Q3 lands on the extreme value itself, so nothing is outside
        assert_eq!(count_outliers(&[10.0, 20.0, 30.0, 1000.0], 1.5), 0);
    }

    #[test]
    fn test_count_outliers_none() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        assert_eq!(count_outliers(&values, 1.5), 0);
    }

    #[test]
    fn test_count_outliers_both_sides() {
        let mut values: Vec<f64> = (0..20).map(|_| 50.0).collect();
        values.push(-500.0);
        values.push(900.0);
        assert_eq!(count_outliers(&values, 1.5), 2);
    }

    #[test]
    fn test_count_outliers_constant_population() {
        assert_eq!(count_outliers(&[5.0, 5.0, 5.0, 5.0], 1.5), 0);
    }

    #[test]
    fn test_count_outliers_boundary_is_not_outlier() {
        // n = 4 -> Q1 = sorted[1] = 10, Q3 = sorted[3] = 10, bounds [10, 10]
        assert_eq!(count_outliers(&[0.0, 10.0, 10.0, 10.0], 1.5), 1);
        assert_eq!(count_outliers(&[10.0, 10.0, 10.0, 10.0], 0.0), 0);
    }

    #[test]
    fn test_count_outliers_empty() {
        assert_eq!(count_outliers(&[], 1.5), 0);
    }

    #[test]
    fn test_count_outliers_order_independent() {
        let a = [3.0, 100.0, 1.0, 2.0, 4.0, 5.0, 2.0];
        let mut b = a;
        b.reverse();
        assert_eq!(count_outliers(&a, 1.5), count_outliers(&b, 1.5));
    }
}
