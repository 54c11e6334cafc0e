use crate::{
    CorrelationMatrix, DashboardResult, Heatmap, IMPUTED_COLUMNS, MissingMatrix, ViewOutcome,
    format_coefficient, mean_impute_columns, missing_heatmap, numeric_columns,
};
use egui::{Grid, Ui};
use polars::prelude::*;

/// Missing-value overview of the merged table.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingOverview {
    pub matrix: MissingMatrix,
}

impl MissingOverview {
    pub fn build(df: &DataFrame) -> DashboardResult<ViewOutcome<Self>> {
        if df.width() == 0 {
            return Ok(ViewOutcome::info("The table has no columns."));
        }

        let matrix = MissingMatrix::from_dataframe(df)?;
        tracing::debug!("Missing values: {} in total", matrix.total());
        Ok(ViewOutcome::Ready(MissingOverview { matrix }))
    }

    pub fn render(&self, ui: &mut Ui) {
        let matrix = &self.matrix;

        ui.strong("Missing Values Heatmap");
        missing_heatmap(ui, &matrix.columns, matrix.rows, &matrix.masks, 360.0);

        ui.add_space(8.0);
        ui.label(format!("Total missing values: {}", matrix.total()));

        let incomplete = matrix.incomplete_columns();
        if incomplete.is_empty() {
            ui.label("Every column is complete.");
            return;
        }

        Grid::new("missing_counts_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Column");
                ui.strong("Missing");
                ui.end_row();

                for (column, count) in incomplete {
                    ui.label(column);
                    ui.label(count.to_string());
                    ui.end_row();
                }
            });
    }
}

/// Correlation before and after mean-imputing the draft columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationComparison {
    /// Imputed columns with the mean used.
    pub imputed: Vec<(String, f64)>,
    /// Draft columns left as they were.
    pub skipped: Vec<String>,
    pub before: CorrelationMatrix,
    pub after: CorrelationMatrix,
}

impl ImputationComparison {
    /// Mean-imputes `DraftYear`, `DraftRound` and `DraftOverall` on a copy of `df`
    /// and correlates both versions.
    ///
    /// Returns `Info` with fewer than two numeric columns.
    pub fn build(df: &DataFrame) -> DashboardResult<ViewOutcome<Self>> {
        if numeric_columns(df).len() < 2 {
            return Ok(ViewOutcome::info(
                "Not enough numeric columns to compare correlations.",
            ));
        }

        let columns: Vec<&str> = IMPUTED_COLUMNS.iter().map(|c| c.name()).collect();
        let outcome = mean_impute_columns(df, &columns)?;

        let before = CorrelationMatrix::from_dataframe(df)?;
        let after = CorrelationMatrix::from_dataframe(&outcome.df)?;

        Ok(ViewOutcome::Ready(ImputationComparison {
            imputed: outcome.imputed,
            skipped: outcome.skipped,
            before,
            after,
        }))
    }

    /// Column pairs whose coefficient moved the most, largest change first.
    ///
    /// Pairs undefined on either side are left out.
    pub fn largest_shifts(&self, limit: usize) -> Vec<(String, String, f64, f64)> {
        let mut shifts: Vec<(String, String, f64, f64)> = self
            .before
            .lower_triangle()
            .into_iter()
            .filter_map(|(row, col, r_before)| {
                let a = &self.before.columns[row];
                let b = &self.before.columns[col];
                let r_after = self.after.get(a, b)?;
                (!r_before.is_nan() && !r_after.is_nan())
                    .then(|| (a.clone(), b.clone(), r_before, r_after))
            })
            .filter(|(_, _, r_before, r_after)| r_before != r_after)
            .collect();

        shifts.sort_by(|x, y| (y.3 - y.2).abs().total_cmp(&(x.3 - x.2).abs()));
        shifts.truncate(limit);
        shifts
    }

    pub fn render(&self, ui: &mut Ui) {
        ui.strong("Imputation of Missing Values: filled with column averages");

        for (column, mean) in &self.imputed {
            ui.label(format!("{column}: missing values filled with {mean:.2}"));
        }
        for column in &self.skipped {
            ui.label(format!("{column}: not imputed"));
        }

        ui.add_space(8.0);
        let cell_size = 22.0;

        ui.strong("Original Combined Data: Correlation (Lower Triangle)");
        Heatmap {
            labels: &self.before.columns,
            cell: &|row, col| self.before.lower(row, col),
            annotate: false,
        }
        .show(ui, cell_size);

        ui.add_space(8.0);
        ui.strong("Imputed Combined Data: Correlation (Lower Triangle)");
        Heatmap {
            labels: &self.after.columns,
            cell: &|row, col| self.after.lower(row, col),
            annotate: false,
        }
        .show(ui, cell_size);

        let shifts = self.largest_shifts(5);
        if shifts.is_empty() {
            return;
        }

        ui.add_space(8.0);
        ui.strong("Largest changes");
        Grid::new("imputation_shift_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for (a, b, r_before, r_after) in shifts {
                    ui.label(format!("{a} vs {b}"));
                    ui.label(format_coefficient(r_before));
                    ui.label(format_coefficient(r_after));
                    ui.end_row();
                }
            });
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_missing_view
#[cfg(test)]
mod tests_missing_view {
    use super::*;

    fn sample_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["A", "B", "C", "D"],
            "Points" => &[10, 25, 40, 60],
            "DraftYear" => &[Some(2010.0), None, Some(2014.0), Some(2016.0)],
            "DraftRound" => &[Some(1), Some(3), None, Some(7)],
            "FaceoffWin%" => &[None::<f64>, None, None, None]
        )
    }

    #[test]
    fn test_overview_total_is_sum_of_counts() -> DashboardResult<()> {
        let df = sample_df()?;

        let Some(overview) = MissingOverview::build(&df)?.ready() else {
            panic!("Expected an overview");
        };

        let matrix = &overview.matrix;
        assert_eq!(matrix.counts, [0, 0, 1, 1, 4]);
        assert_eq!(matrix.total(), matrix.counts.iter().sum::<usize>());
        assert_eq!(matrix.total(), 6);
        Ok(())
    }

    #[test]
    fn test_imputation_comparison() -> DashboardResult<()> {
        let df = sample_df()?;

        let Some(comparison) = ImputationComparison::build(&df)?.ready() else {
            panic!("Expected a comparison");
        };

        let imputed: Vec<&str> = comparison.imputed.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(imputed, ["DraftYear", "DraftRound"]);
        assert_eq!(comparison.skipped, ["DraftOverall"]);

        assert_eq!(comparison.before.columns, comparison.after.columns);

        // Imputed values sit on the column mean, so the coefficient changes.
        let before = comparison.before.get("Points", "DraftYear").unwrap_or(f64::NAN);
        let after = comparison.after.get("Points", "DraftYear").unwrap_or(f64::NAN);
        assert!(!before.is_nan() && !after.is_nan());
        assert_ne!(before, after);

        let shifts = comparison.largest_shifts(10);
        assert!(!shifts.is_empty());
        assert!(
            shifts
                .windows(2)
                .all(|w| (w[0].3 - w[0].2).abs() >= (w[1].3 - w[1].2).abs())
        );
        Ok(())
    }

    #[test]
    fn test_imputation_needs_two_numeric_columns() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B"],
            "Points" => &[1, 2]
        )?;

        assert!(ImputationComparison::build(&df)?.is_info());
        Ok(())
    }
}
