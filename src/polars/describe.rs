use super::numeric::float_column;
use crate::numeric_columns;
use polars::prelude::*;

/// Descriptive statistics of one numeric column. Missing values are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    /// Summarizes a float column; quartiles use linear interpolation.
    pub fn from_chunked(ca: &Float64Chunked) -> PolarsResult<Self> {
        Ok(ColumnSummary {
            column: ca.name().to_string(),
            count: ca.len() - ca.null_count(),
            mean: ca.mean(),
            std: ca.std(1),
            min: ca.min(),
            q25: ca.quantile(0.25, QuantileMethod::Linear)?,
            median: ca.median(),
            q75: ca.quantile(0.75, QuantileMethod::Linear)?,
            max: ca.max(),
        })
    }

    /// Statistic labels, in display order.
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Statistics aligned with `LABELS`.
    pub fn row(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Summaries for every numeric column of `df`.
pub fn describe(df: &DataFrame) -> PolarsResult<Vec<ColumnSummary>> {
    numeric_columns(df)
        .iter()
        .map(|name| ColumnSummary::from_chunked(&float_column(df, name)?))
        .collect()
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
