//! Insertion-ordered frequency counting.
//!
//! Unique counts, modes and top values all go through [`FrequencyTable`] so
//! that ties resolve the same way everywhere: the value seen first wins.

use crate::table::{CellKey, Value};
use std::collections::HashMap;

/// Counter that remembers the order in which keys were first seen.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<CellKey, usize>,
    entries: Vec<(CellKey, usize)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every value, missing values included under one key.
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut table = Self::new();
        for value in values {
            table.insert(value.key());
        }
        table
    }

    pub fn insert(&mut self, key: CellKey) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, key: &CellKey) -> usize {
        self.index.get(key).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Highest count; the earliest key wins a tie.
    pub fn mode(&self) -> Option<(&CellKey, usize)> {
        self.entries
            .iter()
            .fold(None, |best: Option<&(CellKey, usize)>, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
            .map(|(key, count)| (key, *count))
    }

    /// Up to `limit` non-missing keys by descending count, ties in first-seen order.
    pub fn top_present(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut present: Vec<(&str, usize)> = self
            .entries
            .iter()
            .filter_map(|(key, count)| match key {
                CellKey::Present(value) => Some((value.as_str(), *count)),
                CellKey::Missing => None,
            })
            .collect();
        // stable sort keeps encounter order among equal counts
        present.sort_by(|a, b| b.1.cmp(&a.1));
        present.truncate(limit);
        present
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(raw: &[&str]) -> Vec<Value> {
        raw.iter().map(|s| Value::from(*s)).collect()
    }

    #[test]
    fn test_distinct_counts_missing_once() {
        let vals = vec![Value::Null, Value::from(""), Value::from("a"), Value::from("a")];
        let table = FrequencyTable::from_values(&vals);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.count(&CellKey::Missing), 2);
    }

    #[test]
    fn test_mode_first_seen_wins_tie() {
        let vals = values(&["b", "a", "a", "b", "c"]);
        let table = FrequencyTable::from_values(&vals);
        let (key, count) = table.mode().unwrap();
        assert_eq!(key, &CellKey::Present("b".to_string()));
        assert_eq!(count, 2);
    }

    #[test]
    fn test_mode_can_be_missing() {
        let vals = values(&["", "", "x"]);
        let table = FrequencyTable::from_values(&vals);
        assert_eq!(table.mode().unwrap().0, &CellKey::Missing);
    }

    #[test]
    fn test_mode_empty() {
        assert!(FrequencyTable::new().mode().is_none());
    }

    #[test]
    fn test_top_present_order_and_limit() {
        let vals = values(&["x", "y", "", "", "", "y", "z", "w", "z", "x"]);
        let table = FrequencyTable::from_values(&vals);
        // x, y, z all have 2; missing excluded; encounter order x, y, z
        assert_eq!(table.top_present(3), vec![("x", 2), ("y", 2), ("z", 2)]);
        assert_eq!(table.top_present(1), vec![("x", 2)]);
    }

    #[test]
    fn test_top_present_sorted_descending() {
        let vals = values(&["a", "b", "b", "c", "c", "c"]);
        let table = FrequencyTable::from_values(&vals);
        assert_eq!(table.top_present(3), vec![("c", 3), ("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let vals = values(&["q", "p", "q"]);
        let table = FrequencyTable::from_values(&vals);
        let keys: Vec<_> = table.iter().map(|(k, c)| (k.clone(), c)).collect();
        assert_eq!(
            keys,
            vec![
                (CellKey::Present("q".to_string()), 2),
                (CellKey::Present("p".to_string()), 1)
            ]
        );
    }
}
