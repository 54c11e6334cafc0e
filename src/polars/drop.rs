use polars::prelude::*;

/// Drops the named columns that exist in `df`; names that are absent are ignored.
///
/// # Arguments
/// * `df`: The input `DataFrame`.
/// * `names`: Column names to remove.
///
/// # Returns
/// * `PolarsResult<DataFrame>`: The DataFrame without the matching columns, plus the
///   names that were actually dropped.
pub fn drop_columns_if_present(
    df: DataFrame,
    names: &[&str],
) -> PolarsResult<(DataFrame, Vec<String>)> {
    // --- 1. Identify Columns to Drop ---
    let columns_to_drop: Vec<PlSmallStr> = df
        .get_column_names_owned()
        .into_iter()
        .filter(|col_name| names.contains(&col_name.as_str()))
        .collect();

    // --- 2. Handle No-Op Case ---
    if columns_to_drop.is_empty() {
        tracing::debug!("None of {names:?} present. Returning original DataFrame.");
        return Ok((df, Vec::new()));
    }

    tracing::debug!("Dropping columns: {:?}", columns_to_drop);
    let dropped = columns_to_drop.iter().map(|name| name.to_string()).collect();

    // --- 3. Build and Execute Lazy Plan ---
    let df = df.lazy().drop(by_name(columns_to_drop, true, false)).collect()?;
    Ok((df, dropped))
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_drop_cols`
#[cfg(test)]
mod tests_drop_cols {
    use super::*;

    fn create_shared_test_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["A", "B"],
            "Position" => &["D", "D"],
            "Season" => &[20242025, 20242025],
            "Points" => &[10, 20]
        )
    }

    #[test]
    fn test_drop_present_columns() -> PolarsResult<()> {
        let df_input = create_shared_test_df()?;

        let (df_output, dropped) =
            drop_columns_if_present(df_input, &["Position", "Season", "Shooting%"])?;
        println!("Output DF:\n{df_output}");

        let df_expected = df!(
            "Player" => &["A", "B"],
            "Points" => &[10, 20]
        )?;
        assert!(df_output.equals_missing(&df_expected));
        assert_eq!(dropped, ["Position", "Season"]);
        Ok(())
    }

    #[test]
    fn test_drop_no_matching_columns() -> PolarsResult<()> {
        let df_input = create_shared_test_df()?;
        let df_expected = df_input.clone();

        let (df_output, dropped) = drop_columns_if_present(df_input, &["Shooting%"])?;

        assert!(df_output.equals_missing(&df_expected));
        assert!(dropped.is_empty());
        Ok(())
    }
}
