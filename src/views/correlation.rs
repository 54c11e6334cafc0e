use crate::{
    ColumnRole, CorrelationMatrix, DashboardResult, Heatmap, KnownColumn, ViewOutcome,
    format_coefficient, numeric_columns, validate_selection,
};
use egui::{Grid, ScrollArea, Ui};
use polars::prelude::*;

/// Number of ranked coefficients listed under the heatmap.
const RANKED_LIMIT: usize = 10;

/// Pairwise correlation of the numeric columns, shown as a lower triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationView {
    pub matrix: CorrelationMatrix,
    /// Column the ranking is computed against.
    pub target: String,
    /// Other columns by absolute coefficient with `target`.
    pub ranked: Vec<(String, f64)>,
}

impl CorrelationView {
    /// Correlates the numeric columns of `df` and ranks them against `target`.
    ///
    /// `target` defaults to `Points` when present, else the first numeric column.
    /// Returns `Info` with fewer than two numeric columns.
    pub fn build(df: &DataFrame, target: Option<&str>) -> DashboardResult<ViewOutcome<Self>> {
        let numeric = numeric_columns(df);
        if numeric.len() < 2 {
            return Ok(ViewOutcome::info(
                "Not enough numeric columns for a correlation matrix.",
            ));
        }

        let default_target = Self::default_target(&numeric);
        let target = validate_selection(df, target.unwrap_or(default_target), ColumnRole::Numeric)?;

        let matrix = CorrelationMatrix::from_dataframe(df)?;
        let mut ranked = matrix.strongest_with(target);
        ranked.truncate(RANKED_LIMIT);

        Ok(ViewOutcome::Ready(CorrelationView {
            matrix,
            target: target.to_string(),
            ranked,
        }))
    }

    /// `Points` if it is among `numeric`, else the first of `numeric`.
    pub fn default_target(numeric: &[String]) -> &str {
        let points = KnownColumn::Points.name();
        if numeric.iter().any(|name| name == points) {
            points
        } else {
            numeric.first().map(String::as_str).unwrap_or(points)
        }
    }

    pub fn render(&self, ui: &mut Ui) {
        ui.strong("Correlation Matrix (Lower Triangle)");

        ScrollArea::horizontal()
            .id_salt("correlation_heatmap_scroll")
            .show(ui, |ui| {
                Heatmap {
                    labels: &self.matrix.columns,
                    cell: &|row, col| self.matrix.lower(row, col),
                    annotate: true,
                }
                .show(ui, 34.0);
            });

        ui.add_space(8.0);
        ui.strong(format!("Strongest relationships with {}", self.target));

        Grid::new("correlation_ranked_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (column, r) in &self.ranked {
                    ui.label(column);
                    ui.label(format_coefficient(*r));
                    ui.end_row();
                }
            });
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_correlation_view
#[cfg(test)]
mod tests_correlation_view {
    use super::*;
    use crate::DashboardError;

    #[test]
    fn test_defaults_to_points() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B", "C", "D"],
            "Goals" => &[1, 5, 9, 14],
            "Points" => &[10, 21, 33, 40],
            "PenaltyMinutes" => &[40, 12, 30, 8]
        )?;

        let Some(view) = CorrelationView::build(&df, None)?.ready() else {
            panic!("Expected a correlation view");
        };

        assert_eq!(view.target, "Points");
        assert_eq!(view.matrix.columns, ["Goals", "Points", "PenaltyMinutes"]);
        assert_eq!(view.ranked[0].0, "Goals");
        assert_eq!(view.ranked.len(), 2);
        Ok(())
    }

    #[test]
    fn test_target_must_be_numeric() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B"],
            "Goals" => &[1, 2],
            "Points" => &[3, 5]
        )?;

        let result = CorrelationView::build(&df, Some("Player"));

        assert!(matches!(
            result,
            Err(DashboardError::InvalidSelection { ref role, .. }) if role == "numeric"
        ));
        Ok(())
    }

    #[test]
    fn test_text_points_column_falls_back_to_first_numeric() -> DashboardResult<()> {
        let df = df!(
            "GamesPlayed" => &[82, 60, 45],
            "Goals" => &[10, 4, 2],
            "Points" => &["44", "n/a", "12"]
        )?;

        let Some(view) = CorrelationView::build(&df, None)?.ready() else {
            panic!("Expected a correlation view");
        };

        assert_eq!(view.target, "GamesPlayed");
        Ok(())
    }

    #[test]
    fn test_default_target() {
        let numeric = ["GamesPlayed".to_string(), "Points".to_string()];
        assert_eq!(CorrelationView::default_target(&numeric), "Points");
        assert_eq!(CorrelationView::default_target(&numeric[..1]), "GamesPlayed");
    }

    #[test]
    fn test_single_numeric_column_is_info() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B"],
            "Points" => &[3, 5]
        )?;

        assert!(CorrelationView::build(&df, None)?.is_info());
        Ok(())
    }
}
