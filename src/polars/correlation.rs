use super::numeric::column_as_f64;
use crate::numeric_columns;
use polars::prelude::*;

/// Pearson correlation of two columns over the rows where both are present.
///
/// Returns NaN with fewer than two complete pairs or when either side has zero variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();

    let n = pairs.len() as f64;
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let x_mean = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let y_mean = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (mut covariance, mut x_var, mut y_var) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - x_mean;
        let dy = b - y_mean;
        covariance += dx * dy;
        x_var += dx * dx;
        y_var += dy * dy;
    }

    if x_var <= 0.0 || y_var <= 0.0 {
        return f64::NAN;
    }

    (covariance / (x_var.sqrt() * y_var.sqrt())).clamp(-1.0, 1.0)
}

/// Square matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Numeric column names; index `i` labels both row `i` and column `i`.
    pub columns: Vec<String>,
    /// `values[i][j]` is the coefficient of `columns[i]` against `columns[j]`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlates every numeric column of `df` against every other.
    ///
    /// Each pair is computed once and mirrored, so the result is exactly symmetric.
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let columns = numeric_columns(df);
        let data = columns
            .iter()
            .map(|name| column_as_f64(df, name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let size = columns.len();
        let mut values = vec![vec![f64::NAN; size]; size];

        for i in 0..size {
            for j in 0..=i {
                let r = if i == j {
                    // 1.0 unless the column is constant or nearly empty.
                    pearson(&data[i], &data[i])
                } else {
                    pearson(&data[i], &data[j])
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        tracing::debug!("Correlation matrix computed over {size} numeric columns.");
        Ok(CorrelationMatrix { columns, values })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient at `(row, col)` if it lies strictly below the diagonal.
    ///
    /// The diagonal and upper triangle are masked.
    pub fn lower(&self, row: usize, col: usize) -> Option<f64> {
        if col >= row {
            return None;
        }
        self.values.get(row)?.get(col).copied()
    }

    /// Strictly-lower-triangle cells as `(row, col, r)`, NaN cells included.
    pub fn lower_triangle(&self) -> Vec<(usize, usize, f64)> {
        (0..self.len())
            .flat_map(|row| (0..row).map(move |col| (row, col)))
            .map(|(row, col)| (row, col, self.values[row][col]))
            .collect()
    }

    /// Coefficient between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Other columns ranked by absolute correlation with `target`, strongest first.
    pub fn strongest_with(&self, target: &str) -> Vec<(String, f64)> {
        let Some(t) = self.columns.iter().position(|c| c == target) else {
            return Vec::new();
        };

        let mut ranked: Vec<(String, f64)> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != t)
            .map(|(i, name)| (name.clone(), self.values[t][i]))
            .filter(|(_, r)| !r.is_nan())
            .collect();

        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
