//! Pairwise Pearson correlation across numeric columns.

use crate::table::Column;
use crate::types::CorrelationMatrix;
use tracing::debug;

/// A numeric column converted cell by cell.
///
/// `values` is `None` when any cell (missing cells included) failed
/// conversion; every coefficient involving the column is then undefined.
struct ParsedColumn<'a> {
    name: &'a str,
    values: Option<Vec<f64>>,
}

impl<'a> ParsedColumn<'a> {
    fn new(column: Column<'a>) -> Self {
        Self {
            name: column.name(),
            values: column.numeric_values().into_iter().collect(),
        }
    }
}

/// Build the symmetric correlation matrix for the given columns.
///
/// Each unordered pair is computed once and mirrored, so `m[a][b]` and
/// `m[b][a]` are the same bits. Self-pairs go through the same formula.
///
/// A column with any missing or unparseable cell has every coefficient
/// undefined, its own diagonal included. The diagonal is 1.0 (or 0.0 when
/// constant) only for columns without gaps.
pub fn correlation_matrix<'a>(columns: impl IntoIterator<Item = Column<'a>>) -> CorrelationMatrix {
    let parsed: Vec<ParsedColumn<'a>> = columns.into_iter().map(ParsedColumn::new).collect();
    let mut matrix = CorrelationMatrix::new();

    for (i, a) in parsed.iter().enumerate() {
        for b in &parsed[i..] {
            let coefficient = match (&a.values, &b.values) {
                (Some(x), Some(y)) => pearson(x, y),
                _ => None,
            };

            matrix
                .entry(a.name.to_string())
                .or_default()
                .insert(b.name.to_string(), coefficient);
            matrix
                .entry(b.name.to_string())
                .or_default()
                .insert(a.name.to_string(), coefficient);
        }
    }

    let undefined = parsed.iter().filter(|c| c.values.is_none()).count();
    debug!(
        columns = parsed.len(),
        undefined_columns = undefined,
        "Computed correlation matrix"
    );

    matrix
}

/// Pearson coefficient over two aligned sequences.
///
/// Returns `Some(0.0)` when either sequence has zero variance (constant or
/// empty), and `None` when the sums overflow to a non-finite result.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n == 0 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return Some(0.0);
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        return Some(0.0);
    }

    let r = cov / denominator;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
