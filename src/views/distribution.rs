use crate::{
    ColumnRole, DashboardResult, ValueCount, ViewOutcome, categorical_columns, category_bar_chart,
    validate_selection, value_counts,
};
use egui::Ui;
use polars::prelude::*;

/// Value counts of one categorical column (Class Imbalance page).
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub column: String,
    /// Counts in first-seen order; missing values are grouped under `(missing)`.
    pub counts: Vec<ValueCount>,
}

impl Distribution {
    /// Counts the values of `column`, or of the first categorical column when `None`.
    ///
    /// Returns `Info` when the table has no categorical column.
    pub fn build(df: &DataFrame, column: Option<&str>) -> DashboardResult<ViewOutcome<Self>> {
        let candidates = categorical_columns(df);

        let Some(first) = candidates.first() else {
            return Ok(ViewOutcome::info("No categorical columns available."));
        };

        let column = validate_selection(df, column.unwrap_or(first), ColumnRole::Categorical)?;
        let counts = value_counts(df, column)?;

        Ok(ViewOutcome::Ready(Distribution {
            column: column.to_string(),
            counts,
        }))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// Share of each category, from the same counts as the bar chart.
    pub fn proportions(&self) -> Vec<(String, f64)> {
        let total = self.total().max(1) as f64;
        self.counts
            .iter()
            .map(|c| (c.value.clone(), c.count as f64 / total))
            .collect()
    }

    /// Count chart and proportion chart side by side.
    pub fn render(&self, ui: &mut Ui) {
        let counts: Vec<(String, f64)> = self
            .counts
            .iter()
            .map(|c| (c.value.clone(), c.count as f64))
            .collect();

        let proportions: Vec<(String, f64)> = self
            .proportions()
            .into_iter()
            .map(|(label, share)| (label, share * 100.0))
            .collect();

        ui.columns(2, |columns| {
            columns[0].strong(format!("{} Distribution", self.column));
            category_bar_chart(&mut columns[0], "distribution_counts", "Count", &counts, 320.0);

            columns[1].strong(format!("{} Proportion", self.column));
            category_bar_chart(
                &mut columns[1],
                "distribution_proportions",
                "Percent",
                &proportions,
                320.0,
            );
        });

        ui.label(format!(
            "{} players across {} categories.",
            self.total(),
            self.counts.len()
        ));
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
