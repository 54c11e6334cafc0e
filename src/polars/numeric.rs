use polars::prelude::*;

/// Reads a column as a `Float64Chunked` named after it, with NaN turned into null.
///
/// Integer columns are cast to `Float64` first. Non-numeric strings become null
/// under Polars' non-strict cast.
pub fn float_column(df: &DataFrame, name: &str) -> PolarsResult<Float64Chunked> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let ca: Float64Chunked = casted
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect();
    Ok(ca.with_name(name.into()))
}

/// Reads a column as `f64` values, with `None` for nulls and NaN.
pub fn column_as_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    Ok(float_column(df, name)?.into_iter().collect())
}

/// Reads a column as display strings, with `None` for nulls.
pub fn column_as_strings(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let casted = df.column(name)?.cast(&DataType::String)?;
    let values = casted
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_numeric
#[cfg(test)]
mod tests_numeric {
    use super::*;

    #[test]
    fn test_column_as_f64_treats_nan_as_missing() -> PolarsResult<()> {
        let df = df!(
            "ints" => &[Some(1), None, Some(3)],
            "floats" => &[1.0, f64::NAN, 3.5]
        )?;

        assert_eq!(column_as_f64(&df, "ints")?, [Some(1.0), None, Some(3.0)]);
        assert_eq!(column_as_f64(&df, "floats")?, [Some(1.0), None, Some(3.5)]);
        Ok(())
    }

    #[test]
    fn test_float_column_keeps_name_and_counts_nan_as_null() -> PolarsResult<()> {
        let df = df!("TOI/GP" => &[20.5, f64::NAN, 18.0])?;

        let ca = float_column(&df, "TOI/GP")?;

        assert_eq!(ca.name().as_str(), "TOI/GP");
        assert_eq!(ca.null_count(), 1);
        assert_eq!(ca.mean(), Some(19.25));
        Ok(())
    }

    #[test]
    fn test_column_as_strings() -> PolarsResult<()> {
        let df = df!("n" => &[Some(7), None])?;
        assert_eq!(
            column_as_strings(&df, "n")?,
            [Some("7".to_string()), None]
        );
        Ok(())
    }
}
