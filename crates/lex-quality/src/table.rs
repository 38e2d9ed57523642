//! In-memory table model.
//!
//! A [`Table`] is a header plus fixed-arity rows of [`Value`]s. Rows are
//! validated against the header when the table is built, so every consumer
//! downstream can index cells positionally without re-checking shapes.
//! Columns are views over the rows, never stored separately.

use crate::error::{AnalysisError, Result, ResultExt};
use crate::utils::{is_date_string, parse_numeric_str};
use polars::prelude::{AnyValue, DataFrame};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    Null,
    /// Number decoded by the loader.
    Number(f64),
    /// Raw text, including date-like strings.
    Text(String),
}

impl Value {
    /// Missing means null or the empty string.
    #[inline]
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::Number(_) => false,
        }
    }

    /// Explicit numeric coercion. Missing values and failed parses yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_numeric_str(s),
        }
    }

    /// True when the value is text naming a valid calendar date.
    pub fn is_date(&self) -> bool {
        match self {
            Value::Text(s) => is_date_string(s),
            _ => false,
        }
    }

    /// Stringified form used in previews. Missing values render as `""`.
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Canonical key used for equality counting.
    pub fn key(&self) -> CellKey {
        if self.is_missing() {
            CellKey::Missing
        } else {
            CellKey::Present(self.to_string())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Equality key for a cell.
///
/// All missing representations share the single `Missing` key. Present
/// values compare by their display text, so `Number(1.0)` and `Text("1")`
/// are the same value. Serializes as `null` for `Missing`, otherwise as
/// the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellKey {
    Missing,
    Present(String),
}

impl CellKey {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellKey::Missing)
    }
}

/// Validated rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, rejecting malformed shapes.
    ///
    /// Fails with [`AnalysisError::MalformedInput`] when the header is empty,
    /// when column names repeat, or when any row's arity differs from the
    /// header's. Rows are never padded or truncated.
    pub fn new(header: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        if header.is_empty() {
            return Err(AnalysisError::MalformedInput(
                "table has no columns".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(header.len());
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(AnalysisError::MalformedInput(format!(
                    "duplicate column name '{}'",
                    name
                )));
            }
        }

        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(AnalysisError::MalformedInput(format!(
                "row {} has {} values, expected {}",
                idx,
                row.len(),
                header.len()
            )));
        }

        Ok(Self { header, rows })
    }

    /// Convert a polars `DataFrame` into a table.
    ///
    /// Nulls become [`Value::Null`], strings [`Value::Text`], integer and
    /// float cells [`Value::Number`]. Any other dtype is kept as its display
    /// text.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows: Vec<Vec<Value>> = (0..df.height())
            .map(|_| Vec::with_capacity(header.len()))
            .collect();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let label = format!("reading column '{}'", col.name());
            for (idx, row) in rows.iter_mut().enumerate() {
                row.push(any_value_to_value(series.get(idx).context(label.as_str())?));
            }
        }

        Self::new(header, rows)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// View of the column at `index`, if it exists.
    pub fn column(&self, index: usize) -> Option<Column<'_>> {
        self.header.get(index).map(|name| Column {
            name,
            index,
            rows: &self.rows,
        })
    }

    /// View of the column called `name`.
    pub fn column_by_name(&self, name: &str) -> Result<Column<'_>> {
        self.header
            .iter()
            .position(|h| h == name)
            .and_then(|idx| self.column(idx))
            .ok_or_else(|| AnalysisError::ColumnNotFound(name.to_string()))
    }

    /// All column views in header order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> {
        (0..self.header.len()).filter_map(move |idx| self.column(idx))
    }
}

/// Check that every record of raw CSV bytes has as many fields as the header.
///
/// Readers that pad short records with nulls would otherwise hand a ragged
/// file over as a well-formed frame. `quote_char` must match the quoting the
/// frame is read with; `None` disables quoting. Row indices in the error count
/// data rows from 0, as [`Table::new`] does.
pub fn check_record_arity(content: &[u8], quote_char: Option<u8>) -> Result<()> {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(quote_char.is_some());
    if let Some(quote) = quote_char {
        builder.quote(quote);
    }

    let mut records = builder.from_reader(content).into_byte_records();
    let expected = match records.next() {
        Some(header) => header?.len(),
        None => return Ok(()),
    };

    for (idx, record) in records.enumerate() {
        let found = record?.len();
        if found != expected {
            return Err(AnalysisError::MalformedInput(format!(
                "row {} has {} values, expected {}",
                idx, found, expected
            )));
        }
    }

    Ok(())
}

fn any_value_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_)
        | AnyValue::Float32(_)
        | AnyValue::Float64(_) => value
            .extract::<f64>()
            .map_or(Value::Null, Value::Number),
        other => Value::Text(format!("{}", other)),
    }
}

/// A column as a view over the table's rows.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    name: &'a str,
    index: usize,
    rows: &'a [Vec<Value>],
}

impl<'a> Column<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values in row order.
    pub fn values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let (rows, index) = (self.rows, self.index);
        rows.iter().map(move |row| &row[index])
    }

    /// Every cell coerced to a number, `None` where coercion fails.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values().map(Value::as_number).collect()
    }
}
