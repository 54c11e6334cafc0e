use polars::prelude::*;

/// Replaces placeholder strings (e.g. `--`, `N/A`) with null in every `String` column.
///
/// Values are trimmed before comparison, so `" -- "` matches `--`.
/// Non-string columns are untouched. CSV files get the same treatment at parse time;
/// this covers JSON and Parquet sources.
pub fn replace_markers_with_null(
    dataframe: DataFrame,
    null_value_list: &[&str],
) -> PolarsResult<DataFrame> {
    // If the list is empty, no replacements are needed.
    if null_value_list.is_empty() {
        return Ok(dataframe);
    }

    let string_columns: Vec<PlSmallStr> = dataframe
        .schema()
        .iter()
        .filter(|(_, dtype)| *dtype == &DataType::String)
        .map(|(name, _)| name.clone())
        .collect();

    if string_columns.is_empty() {
        return Ok(dataframe);
    }

    let replacement_exprs: Vec<Expr> = string_columns
        .iter()
        .map(|name| {
            let trimmed = col(name.clone()).str().strip_chars(lit(NULL));

            // trimmed == m1 OR trimmed == m2 ...
            let condition = null_value_list
                .iter()
                .map(|marker| trimmed.clone().eq(lit(*marker)))
                .reduce(|acc, expr| acc.or(expr))
                .unwrap_or_else(|| lit(false));

            when(condition)
                .then(lit(NULL).cast(DataType::String))
                .otherwise(col(name.clone()))
                .alias(name.clone())
        })
        .collect();

    tracing::debug!("Replacing {null_value_list:?} with null in {string_columns:?}");

    dataframe.lazy().with_columns(replacement_exprs).collect()
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
