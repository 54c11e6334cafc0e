use crate::{
    ColumnSummary, DashboardResult, Dataset, MissingMatrix, ViewOutcome, describe,
    render_grid_table, render_table,
};
use egui::{Color32, Frame, Grid, Stroke, Ui};
use polars::prelude::*;

/// Headline numbers of the merged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetMetrics {
    pub rows: usize,
    pub features: usize,
    pub missing: usize,
}

/// Everything the Dataset Overview page shows besides the raw tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub metrics: DatasetMetrics,
    /// `(column, data type)` in table order.
    pub dtypes: Vec<(String, String)>,
    pub summaries: Vec<ColumnSummary>,
}

impl Overview {
    pub fn build(df: &DataFrame) -> DashboardResult<ViewOutcome<Self>> {
        let missing = MissingMatrix::from_dataframe(df)?;

        let dtypes = df
            .schema()
            .iter()
            .map(|(name, dtype)| (name.to_string(), dtype.to_string()))
            .collect();

        Ok(ViewOutcome::Ready(Overview {
            metrics: DatasetMetrics {
                rows: df.height(),
                features: df.width(),
                missing: missing.total(),
            },
            dtypes,
            summaries: describe(df)?,
        }))
    }

    /// Summary statistics transposed: one row per numeric column.
    pub fn summary_rows(&self) -> Vec<Vec<String>> {
        self.summaries
            .iter()
            .map(|summary| {
                std::iter::once(summary.column.clone())
                    .chain(summary.row().iter().map(|value| match value {
                        Some(v) => format!("{v:.2}"),
                        None => String::new(),
                    }))
                    .collect()
            })
            .collect()
    }

    pub fn render_metrics(&self, ui: &mut Ui) {
        let metrics = [
            ("Rows", self.metrics.rows),
            ("Features", self.metrics.features),
            ("Missing Values", self.metrics.missing),
        ];

        ui.horizontal(|ui| {
            for (label, value) in metrics {
                Frame::default()
                    .stroke(Stroke::new(1.0, Color32::GRAY))
                    .outer_margin(2.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            ui.label(label);
                            ui.heading(value.to_string());
                        });
                    });
            }
        });
    }

    /// Full page: metrics, source tables, combined table, types and statistics.
    pub fn render(&self, ui: &mut Ui, dataset: &Dataset) {
        self.render_metrics(ui);

        ui.add_space(8.0);
        ui.heading("Raw Datasets");
        ui.strong("Season Stats");
        render_table(ui, "overview_performance", &dataset.performance, 240.0);
        ui.add_space(6.0);
        ui.strong("Bio Stats");
        render_table(ui, "overview_biographical", &dataset.biographical, 240.0);

        ui.add_space(8.0);
        ui.heading("Combined Dataset");
        render_table(ui, "overview_merged", &dataset.merged, 320.0);

        ui.add_space(8.0);
        ui.heading("Data Types and Summary Stats");

        ui.columns(2, |columns| {
            Grid::new("overview_dtypes_grid")
                .num_columns(2)
                .striped(true)
                .show(&mut columns[0], |ui| {
                    ui.strong("Column");
                    ui.strong("Type");
                    ui.end_row();
                    for (name, dtype) in &self.dtypes {
                        ui.label(name);
                        ui.label(dtype);
                        ui.end_row();
                    }
                });

            let mut headers = vec![""];
            headers.extend(ColumnSummary::LABELS);
            render_grid_table(
                &mut columns[1],
                "overview_describe",
                &headers,
                &self.summary_rows(),
                420.0,
            );
        });
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_overview
#[cfg(test)]
mod tests_overview {
    use super::*;

    #[test]
    fn test_overview_metrics_and_types() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A", "B", "C"],
            "Country" => &[Some("CAN"), None, Some("USA")],
            "Points" => &[Some(10), Some(20), None],
            "Height" => &[70.5, 72.0, 74.5]
        )?;

        let Some(overview) = Overview::build(&df)?.ready() else {
            panic!("Expected an overview");
        };

        assert_eq!(
            overview.metrics,
            DatasetMetrics {
                rows: 3,
                features: 4,
                missing: 2
            }
        );
        assert_eq!(overview.dtypes[0], ("Player".to_string(), "str".to_string()));
        assert_eq!(overview.summaries.len(), 2);

        let rows = overview.summary_rows();
        assert_eq!(rows[0][0], "Points");
        assert_eq!(rows[0].len(), 1 + ColumnSummary::LABELS.len());
        assert_eq!(rows[0][1], "2.00");
        assert_eq!(rows[1][2], "72.33");
        Ok(())
    }
}
