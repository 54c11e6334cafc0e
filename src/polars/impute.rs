use super::numeric::float_column;
use crate::is_numeric_dtype;
use polars::prelude::*;

/// Result of mean-imputing a set of columns.
#[derive(Debug, Clone)]
pub struct ImputationOutcome {
    /// Copy of the input with the imputed columns replaced (as `Float64`).
    pub df: DataFrame,
    /// Imputed columns and the mean each was filled with.
    pub imputed: Vec<(String, f64)>,
    /// Requested columns left untouched: absent, non-numeric, or without any value.
    pub skipped: Vec<String>,
}

/// Mean-imputes the named columns of a copy of `df`.
///
/// The input is not modified. Imputing an already imputed frame changes nothing.
pub fn mean_impute_columns(df: &DataFrame, columns: &[&str]) -> PolarsResult<ImputationOutcome> {
    let mut output = df.clone();
    let mut imputed = Vec::new();
    let mut skipped = Vec::new();

    for &name in columns {
        let Some(dtype) = df.schema().get(name) else {
            tracing::debug!("Imputation skipped: column '{name}' not found.");
            skipped.push(name.to_string());
            continue;
        };

        if !is_numeric_dtype(dtype) {
            tracing::warn!("Imputation skipped: column '{name}' has non-numeric type {dtype}.");
            skipped.push(name.to_string());
            continue;
        }

        let values = float_column(df, name)?;
        let Some(fill) = values.mean() else {
            tracing::warn!("Imputation skipped: column '{name}' has no values to average.");
            skipped.push(name.to_string());
            continue;
        };

        let filled = values.fill_null_with_values(fill)?;
        output.with_column(filled.into_series().into())?;
        imputed.push((name.to_string(), fill));
    }

    tracing::debug!("Imputed columns: {imputed:?}, skipped: {skipped:?}");

    Ok(ImputationOutcome {
        df: output,
        imputed,
        skipped,
    })
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_impute
#[cfg(test)]
mod tests_impute {
    use super::*;
    use crate::polars::missing::MissingMatrix;

    #[test]
    fn test_mean_impute_columns_nan_input() -> PolarsResult<()> {
        let df = df!("DraftYear" => &[1.0, f64::NAN, 3.0])?;

        let outcome = mean_impute_columns(&df, &["DraftYear"])?;

        let expected = df!("DraftYear" => &[1.0, 2.0, 3.0])?;
        assert!(outcome.df.equals_missing(&expected), "{}", outcome.df);
        assert_eq!(outcome.imputed, [("DraftYear".to_string(), 2.0)]);
        assert!(outcome.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn test_mean_impute_columns_is_idempotent() -> PolarsResult<()> {
        let df = df!(
            "DraftYear" => &[Some(2010), None, Some(2014), None],
            "DraftRound" => &[Some(1), Some(4), None, Some(7)]
        )?;
        let columns = ["DraftYear", "DraftRound"];

        let once = mean_impute_columns(&df, &columns)?;
        let twice = mean_impute_columns(&once.df, &columns)?;

        assert!(once.df.equals_missing(&twice.df));
        assert_eq!(MissingMatrix::from_dataframe(&once.df)?.total(), 0);
        Ok(())
    }

    #[test]
    fn test_mean_impute_columns_skips_unusable() -> PolarsResult<()> {
        let empty = Series::full_null("DraftOverall".into(), 2, &DataType::Float64);
        let df = df!(
            "DraftOverall" => &empty,
            "Country" => &["CAN", "USA"],
            "Points" => &[Some(5), None]
        )?;

        let outcome = mean_impute_columns(&df, &["DraftOverall", "Country", "DraftYear"])?;

        assert!(outcome.imputed.is_empty());
        assert_eq!(outcome.skipped, ["DraftOverall", "Country", "DraftYear"]);
        assert!(outcome.df.equals_missing(&df), "input must be preserved");
        Ok(())
    }
}
