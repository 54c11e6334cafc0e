use crate::{
    ColumnRole, DashboardResult, MISSING_LABEL, PointSeries, ViewOutcome, compact_scatter,
    grouped_scatter, histogram_chart, hover_columns, numeric_columns,
    polars::numeric::{column_as_f64, column_as_strings},
    validate_selection,
};
use egui::{Grid, Ui};
use polars::prelude::*;

/// Columns shown in the pair grid.
pub const PAIR_GRID_LIMIT: usize = 6;

/// Series name used when no color group is selected.
const ALL_PLAYERS: &str = "All players";

/// One plotted player.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Hover metadata as `(column, value)`, in hover-field order.
    pub hover: Vec<(String, String)>,
}

/// Points sharing one value of the color group.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub group: String,
    pub points: Vec<ScatterPoint>,
}

/// Interactive scatter of two numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub x: String,
    pub y: String,
    pub color: Option<String>,
    /// One series per group value in first-seen order; a single series without color.
    pub series: Vec<ScatterSeries>,
    /// Rows left out because x or y is missing.
    pub skipped: usize,
}

impl ScatterChart {
    /// Builds the chart for the selected axes and optional color group.
    ///
    /// `x` defaults to the first numeric column and `y` to the second (or the first
    /// when there is only one). Returns `Info` when the table has no numeric column.
    pub fn build(
        df: &DataFrame,
        x: Option<&str>,
        y: Option<&str>,
        color: Option<&str>,
    ) -> DashboardResult<ViewOutcome<Self>> {
        let numeric = numeric_columns(df);
        let Some(first) = numeric.first() else {
            return Ok(ViewOutcome::info("No numeric columns available for a scatter plot."));
        };
        let second = numeric.get(1).unwrap_or(first);

        let x = validate_selection(df, x.unwrap_or(first), ColumnRole::Numeric)?;
        let y = validate_selection(df, y.unwrap_or(second), ColumnRole::Numeric)?;
        let color = color
            .map(|c| validate_selection(df, c, ColumnRole::ColorGroup))
            .transpose()?;

        let xs = column_as_f64(df, x)?;
        let ys = column_as_f64(df, y)?;
        let groups = match color {
            Some(c) => column_as_strings(df, c)?,
            None => vec![None; df.height()],
        };

        let hover_names = hover_columns(df);
        let hover_values = hover_names
            .iter()
            .map(|name| column_as_strings(df, name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let mut series: Vec<ScatterSeries> = Vec::new();
        let mut skipped = 0;

        for row in 0..df.height() {
            let (Some(px), Some(py)) = (xs[row], ys[row]) else {
                skipped += 1;
                continue;
            };

            let group = match color {
                Some(_) => groups[row].clone().unwrap_or_else(|| MISSING_LABEL.to_string()),
                None => ALL_PLAYERS.to_string(),
            };

            let hover = hover_names
                .iter()
                .zip(&hover_values)
                .map(|(name, values)| (name.clone(), values[row].clone().unwrap_or_default()))
                .collect();

            let point = ScatterPoint { x: px, y: py, hover };

            match series.iter_mut().find(|s| s.group == group) {
                Some(existing) => existing.points.push(point),
                None => series.push(ScatterSeries {
                    group,
                    points: vec![point],
                }),
            }
        }

        if skipped > 0 {
            tracing::debug!("Scatter {y} vs {x}: {skipped} rows skipped (missing values)");
        }

        Ok(ViewOutcome::Ready(ScatterChart {
            x: x.to_string(),
            y: y.to_string(),
            color: color.map(str::to_string),
            series,
            skipped,
        }))
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn render(&self, ui: &mut Ui) {
        ui.strong(format!("{} vs {}", self.y, self.x));

        let plotted: Vec<PointSeries<'_>> = self
            .series
            .iter()
            .map(|s| PointSeries {
                name: &s.group,
                points: s.points.iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();

        let (response, hovered) =
            grouped_scatter(ui, "scatter_plot", &self.x, &self.y, &plotted, 420.0);

        if let Some((si, pi)) = hovered {
            let point = &self.series[si].points[pi];
            response.on_hover_ui_at_pointer(|ui| {
                Grid::new("scatter_hover_grid").num_columns(2).show(ui, |ui| {
                    for (name, value) in &point.hover {
                        ui.label(name);
                        ui.label(value);
                        ui.end_row();
                    }
                    ui.label(&self.x);
                    ui.label(point.x.to_string());
                    ui.end_row();
                    ui.label(&self.y);
                    ui.label(point.y.to_string());
                    ui.end_row();
                });
            });
        }

        if self.skipped > 0 {
            ui.label(format!("{} players not shown (missing values).", self.skipped));
        }
    }
}

/// Equal-width histogram of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Sturges' rule: `ceil(log2(n)) + 1` bins, at least one.
pub fn sturges_bins(n: usize) -> usize {
    if n <= 1 {
        return 1;
    }
    (n as f64).log2().ceil() as usize + 1
}

impl Histogram {
    /// Bins the present values with Sturges' bin count. `None` when nothing is present.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let min = present.iter().copied().reduce(f64::min)?;
        let max = present.iter().copied().reduce(f64::max)?;

        let bins = sturges_bins(present.len());

        // A constant column gets one unit-wide bin around its value.
        let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
        let width = (hi - lo) / bins as f64;

        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in present {
            let index = (((v - lo) / width) as usize).min(bins - 1);
            counts[index] += 1;
        }

        Some(Histogram { edges, counts })
    }
}

/// Lower-triangle grid of pairwise scatters over the first numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PairGrid {
    pub columns: Vec<String>,
    /// Values of each column, aligned with `columns`.
    pub values: Vec<Vec<Option<f64>>>,
    /// Diagonal histograms; `None` for columns without values.
    pub histograms: Vec<Option<Histogram>>,
}

impl PairGrid {
    /// Returns `Info` with fewer than two numeric columns.
    pub fn build(df: &DataFrame) -> DashboardResult<ViewOutcome<Self>> {
        let columns: Vec<String> = numeric_columns(df)
            .into_iter()
            .take(PAIR_GRID_LIMIT)
            .collect();

        if columns.len() < 2 {
            return Ok(ViewOutcome::info("Not enough numeric columns for a pairplot."));
        }

        let values = columns
            .iter()
            .map(|name| column_as_f64(df, name))
            .collect::<PolarsResult<Vec<_>>>()?;

        let histograms = values.iter().map(|v| Histogram::from_values(v)).collect();

        Ok(ViewOutcome::Ready(PairGrid {
            columns,
            values,
            histograms,
        }))
    }

    /// Complete `(x, y)` pairs for the cell at `(row, col)`: x from `col`, y from `row`.
    pub fn pairs(&self, row: usize, col: usize) -> Vec<[f64; 2]> {
        self.values[col]
            .iter()
            .zip(&self.values[row])
            .filter_map(|(x, y)| Some([(*x)?, (*y)?]))
            .collect()
    }

    pub fn render(&self, ui: &mut Ui) {
        let n = self.columns.len();
        let cell = ((ui.available_width() - 60.0) / n as f32).clamp(90.0, 180.0);

        Grid::new("pair_grid")
            .num_columns(n + 1)
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for row in 0..n {
                    ui.label(&self.columns[row]);
                    for col in 0..=row {
                        let id = format!("pair_{row}_{col}");
                        if row == col {
                            match &self.histograms[row] {
                                Some(h) => {
                                    histogram_chart(ui, &id, &h.edges, &h.counts, cell);
                                }
                                None => {
                                    ui.label("no values");
                                }
                            }
                        } else {
                            compact_scatter(ui, &id, self.pairs(row, col), cell);
                        }
                    }
                    ui.end_row();
                }

                ui.label("");
                for name in &self.columns {
                    ui.label(name);
                }
                ui.end_row();
            });
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_scatter
#[cfg(test)]
mod tests_scatter {
    use super::*;
    use crate::DashboardError;

    fn sample_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["A", "B", "C", "D", "E"],
            "Team" => &["TOR", "VAN", "BOS", "COL", "TOR"],
            "ShootsHand" => &[Some("L"), Some("R"), Some("L"), None, Some("R")],
            "GamesPlayed" => &[82, 70, 65, 80, 12],
            "Points" => &[Some(50), Some(30), None, Some(44), Some(2)],
            "Division" => &["ATL", "PAC", "ATL", "CEN", "ATL"]
        )
    }

    #[test]
    fn test_scatter_defaults_and_single_series() -> DashboardResult<()> {
        let df = sample_df()?;

        let Some(chart) = ScatterChart::build(&df, None, None, None)?.ready() else {
            panic!("Expected a scatter chart");
        };

        assert_eq!(chart.x, "GamesPlayed");
        assert_eq!(chart.y, "Points");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.point_count(), 4);
        assert_eq!(chart.skipped, 1);

        let hover_names: Vec<&str> = chart.series[0].points[0]
            .hover
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(hover_names, ["Player", "Team", "GamesPlayed", "Points", "Division"]);
        Ok(())
    }

    #[test]
    fn test_scatter_groups_by_color() -> DashboardResult<()> {
        let df = sample_df()?;

        let Some(chart) =
            ScatterChart::build(&df, Some("GamesPlayed"), Some("Points"), Some("ShootsHand"))?
                .ready()
        else {
            panic!("Expected a scatter chart");
        };

        let groups: Vec<(&str, usize)> = chart
            .series
            .iter()
            .map(|s| (s.group.as_str(), s.points.len()))
            .collect();
        assert_eq!(groups, [("L", 1), ("R", 2), (MISSING_LABEL, 1)]);
        assert_eq!(chart.point_count() + chart.skipped, df.height());
        Ok(())
    }

    #[test]
    fn test_scatter_rejects_invalid_color() -> DashboardResult<()> {
        let df = sample_df()?;

        let result = ScatterChart::build(&df, None, None, Some("Player"));

        assert!(matches!(
            result,
            Err(DashboardError::InvalidSelection { ref role, .. }) if role == "color group"
        ));
        Ok(())
    }

    #[test]
    fn test_scatter_single_numeric_column_uses_it_twice() -> DashboardResult<()> {
        let df = df!("Player" => &["A", "B"], "Points" => &[1, 2])?;

        let Some(chart) = ScatterChart::build(&df, None, None, None)?.ready() else {
            panic!("Expected a scatter chart");
        };
        assert_eq!((chart.x.as_str(), chart.y.as_str()), ("Points", "Points"));

        let empty = df!("Player" => &["A"])?;
        assert!(ScatterChart::build(&empty, None, None, None)?.is_info());
        Ok(())
    }

    #[test]
    fn test_sturges_bins() {
        assert_eq!(sturges_bins(0), 1);
        assert_eq!(sturges_bins(1), 1);
        assert_eq!(sturges_bins(2), 2);
        assert_eq!(sturges_bins(8), 4);
        assert_eq!(sturges_bins(9), 5);
        assert_eq!(sturges_bins(300), 10);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0), Some(5.0)];

        let Some(histogram) = Histogram::from_values(&values) else {
            panic!("Expected a histogram");
        };

        assert_eq!(histogram.counts.len(), sturges_bins(5));
        assert_eq!(histogram.edges.len(), histogram.counts.len() + 1);
        assert_eq!(histogram.counts.iter().sum::<usize>(), 5);
        assert_eq!(histogram.edges.first(), Some(&1.0));
        assert_eq!(histogram.edges.last(), Some(&5.0));

        assert!(Histogram::from_values(&[None, None]).is_none());
    }

    #[test]
    fn test_pair_grid_limits_columns() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B", "C"],
            "c1" => &[1, 2, 3],
            "c2" => &[Some(2.0), None, Some(6.0)],
            "c3" => &[1, 1, 1],
            "c4" => &[3, 2, 1],
            "c5" => &[0, 5, 9],
            "c6" => &[7, 8, 9],
            "c7" => &[1, 0, 1]
        )?;

        let Some(grid) = PairGrid::build(&df)?.ready() else {
            panic!("Expected a pair grid");
        };

        assert_eq!(grid.columns, ["c1", "c2", "c3", "c4", "c5", "c6"]);
        assert_eq!(grid.histograms.len(), PAIR_GRID_LIMIT);
        // Row with a missing c2 is dropped from that cell only.
        assert_eq!(grid.pairs(1, 0), vec![[1.0, 2.0], [3.0, 6.0]]);
        assert_eq!(grid.pairs(2, 0).len(), 3);
        Ok(())
    }

    #[test]
    fn test_pair_grid_needs_two_columns() -> DashboardResult<()> {
        let df = df!("Player" => &["A"], "Points" => &[1])?;
        assert!(PairGrid::build(&df)?.is_info());
        Ok(())
    }
}
