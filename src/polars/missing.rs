use super::numeric::column_as_f64;
use polars::prelude::*;

/// Per-row missingness of one column: null, or NaN in float columns.
pub fn missing_mask(df: &DataFrame, name: &str) -> PolarsResult<Vec<bool>> {
    let column = df.column(name)?;

    if column.dtype().is_float() {
        let values = column_as_f64(df, name)?;
        return Ok(values.iter().map(Option::is_none).collect());
    }

    let mask = column
        .as_materialized_series()
        .is_null()
        .into_iter()
        .map(|is_null| is_null.unwrap_or(true))
        .collect();
    Ok(mask)
}

/// Missing-value layout of a whole table.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingMatrix {
    /// Column names, in table order.
    pub columns: Vec<String>,
    /// Row count of the table.
    pub rows: usize,
    /// One mask per column; `masks[c][r]` is `true` when row `r` of column `c` is missing.
    pub masks: Vec<Vec<bool>>,
    /// Missing count per column, aligned with `columns`.
    pub counts: Vec<usize>,
}

impl MissingMatrix {
    /// Builds the mask and counts for every column of `df`.
    pub fn from_dataframe(df: &DataFrame) -> PolarsResult<Self> {
        let columns: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let masks = columns
            .iter()
            .map(|name| missing_mask(df, name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let counts = masks
            .iter()
            .map(|mask| mask.iter().filter(|&&missing| missing).count())
            .collect();

        Ok(MissingMatrix {
            columns,
            rows: df.height(),
            masks,
            counts,
        })
    }

    /// Missing values across the whole table.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Columns with at least one missing value, with their counts.
    pub fn incomplete_columns(&self) -> Vec<(&str, usize)> {
        self.columns
            .iter()
            .zip(&self.counts)
            .filter(|(_, count)| **count > 0)
            .map(|(name, count)| (name.as_str(), *count))
            .collect()
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
