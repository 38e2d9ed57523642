//! Whole-row duplicate detection.

use crate::table::{CellKey, Value};
use std::collections::HashSet;

/// Number of rows that repeat an earlier row: total rows minus distinct rows.
///
/// Rows compare cell by cell through [`Value::key`], so every missing
/// representation matches every other and `1` matches `1.0`.
pub fn count_duplicate_rows(rows: &[Vec<Value>]) -> usize {
    let distinct: HashSet<Vec<CellKey>> = rows
        .iter()
        .map(|row| row.iter().map(Value::key).collect())
        .collect();
    rows.len() - distinct.len()
}
