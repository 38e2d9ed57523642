//! Shared utilities for the quality engine.
//!
//! Parsing helpers live here so that type inference, outlier detection and
//! correlation all agree on what "parses as a number" and "parses as a date"
//! mean.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Characters allowed in a decimal numeric literal.
const DECIMAL_CHARS: &str = "0123456789+-.eE";

/// Parse a string as a number.
///
/// Accepts decimal literals with optional sign, fraction and exponent,
/// `Infinity` with an optional sign, and unsigned `0x`/`0o`/`0b` integer
/// literals. Surrounding whitespace is ignored. Empty strings never parse,
/// and neither does anything that would produce NaN.
///
/// # Example
///
/// ```rust,ignore
/// use lex_quality::utils::parse_numeric_str;
///
/// assert_eq!(parse_numeric_str(" 42 "), Some(42.0));
/// assert_eq!(parse_numeric_str("1e3"), Some(1000.0));
/// assert_eq!(parse_numeric_str("0x1F"), Some(31.0));
/// assert_eq!(parse_numeric_str(""), None);
/// assert_eq!(parse_numeric_str("$100"), None);
/// ```
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return Some(value);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    // Rust's float parser also accepts "inf" and "nan"; restrict to plain decimals.
    if !trimmed.chars().all(|c| DECIMAL_CHARS.contains(c)) {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let (radix, digits) = match s.get(..2)? {
        "0x" | "0X" => (16, &s[2..]),
        "0o" | "0O" => (8, &s[2..]),
        "0b" | "0B" => (2, &s[2..]),
        _ => return None,
    };
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}

// =============================================================================
// Date Parsing
// =============================================================================

// Date-shaped strings, compiled once. Shape only; chrono checks the calendar.
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}(?:[T ]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
        )
        .expect("Invalid regex: ISO date/datetime"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^[A-Za-z]{3,9} \d{1,2},? \d{4}$").expect("Invalid regex: Mon DD, YYYY"),
        Regex::new(r"^\d{1,2} [A-Za-z]{3,9} \d{4}$").expect("Invalid regex: DD Mon YYYY"),
        Regex::new(
            r"^(?:[A-Za-z]{3}, )?\d{1,2} [A-Za-z]{3} \d{4} \d{2}:\d{2}(?::\d{2})? (?:[+-]\d{4}|[A-Z]{2,3})$",
        )
        .expect("Invalid regex: RFC 2822"),
    ]
});

const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Check if a string holds a valid calendar date (optionally with a time).
///
/// The string must look like a date and name a day that exists:
/// `2024-02-29` parses, `2023-02-29` does not.
pub fn is_date_string(s: &str) -> bool {
    let trimmed = s.trim();
    if trimmed.is_empty() || !DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
        return false;
    }

    DateTime::parse_from_rfc3339(trimmed).is_ok()
        || DateTime::parse_from_rfc2822(trimmed).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
        || DATETIME_FORMATS.iter().any(|fmt| {
            NaiveDateTime::parse_from_str(trimmed, fmt).is_ok()
                || DateTime::parse_from_str(trimmed, fmt).is_ok()
        })
}

// =============================================================================
// Percentages
// =============================================================================

/// `part / whole * 100`, or 0.0 when `whole` is zero.
#[inline]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

// =============================================================================
// Tests
// =============================================================================
