use super::numeric::column_as_strings;
use polars::prelude::*;

/// Label given to the group of missing values.
pub const MISSING_LABEL: &str = "(missing)";

/// Internal name of the aggregated count column.
const COUNT_ALIAS: &str = "__value_count";

/// One distinct value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Frequency of each distinct value of `name`, in first-seen order.
///
/// Null values form their own group labelled `MISSING_LABEL`.
pub fn value_counts(df: &DataFrame, name: &str) -> PolarsResult<Vec<ValueCount>> {
    let grouped = df
        .clone()
        .lazy()
        .select([col(name)])
        .group_by_stable([col(name)])
        .agg([len().alias(COUNT_ALIAS)])
        .collect()?;

    let values = column_as_strings(&grouped, name)?;
    let counts = grouped.column(COUNT_ALIAS)?.cast(&DataType::UInt64)?;
    let counts = counts.as_materialized_series().u64()?;

    let result: Vec<ValueCount> = values
        .into_iter()
        .zip(counts.into_iter())
        .map(|(value, count)| ValueCount {
            value: value.unwrap_or_else(|| MISSING_LABEL.to_string()),
            count: count.unwrap_or(0) as usize,
        })
        .collect();

    tracing::debug!("value_counts('{name}'): {} groups", result.len());
    Ok(result)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
