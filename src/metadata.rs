use crate::{Dataset, FileExtension, TableKind};

use egui::{Color32, Frame, Grid, Stroke, Ui};
use polars::prelude::*;
use std::path::PathBuf;

/// Shape and origin of one source table.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMetadata {
    pub kind: TableKind,
    pub path: PathBuf,
    pub format: FileExtension,
    pub row_count: usize,
    pub col_count: usize,
}

/// Side-panel summary of the loaded dataset.
#[derive(Debug, Clone)]
pub struct DatasetMetadata {
    pub sources: [SourceMetadata; 2],
    /// Number of rows in the merged table.
    pub row_count: usize,
    /// Number of columns in the merged table.
    pub col_count: usize,
    /// Schema of the merged table.
    schema: SchemaRef,
}

impl DatasetMetadata {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let source = |kind: TableKind, df: &DataFrame| {
            let (path, format) = dataset.source(kind);
            SourceMetadata {
                kind,
                path,
                format,
                row_count: df.height(),
                col_count: df.width(),
            }
        };

        DatasetMetadata {
            sources: [
                source(TableKind::Performance, dataset.performance.as_ref()),
                source(TableKind::Biographical, dataset.biographical.as_ref()),
            ],
            row_count: dataset.merged.height(),
            col_count: dataset.merged.width(),
            schema: dataset.merged.schema().clone(),
        }
    }

    /// Renders the row and column counts of each source and of the merged table.
    pub fn render_metadata(&self, ui: &mut Ui) {
        Frame::default()
            .stroke(Stroke::new(1.0, Color32::GRAY))
            .outer_margin(2.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                Grid::new("metadata_grid")
                    .num_columns(2)
                    .spacing([10.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        for source in &self.sources {
                            ui.strong(format!("{} table", source.kind));
                            ui.label(source.format.to_string());
                            ui.end_row();

                            ui.label("File:");
                            ui.label(source.path.display().to_string());
                            ui.end_row();

                            ui.label("Shape:");
                            ui.label(format!("{} × {}", source.row_count, source.col_count));
                            ui.end_row();
                        }

                        ui.strong("Combined");
                        ui.label("");
                        ui.end_row();

                        ui.label("Columns:");
                        ui.label(self.col_count.to_string());
                        ui.end_row();

                        ui.label("Rows:");
                        ui.label(self.row_count.to_string());
                        ui.end_row();
                    });
            });
    }

    /// Renders the merged schema: one collapsing header per column with its index and type.
    /// Right-clicking a column name copies it to the clipboard.
    pub fn render_schema(&self, ui: &mut Ui) {
        ui.label("Tip: Right-click a column name to copy it to the clipboard.");

        for (index, (name, dtype)) in self.schema.iter().enumerate() {
            let header_response = ui.collapsing(name.to_string(), |ui| {
                ui.label(format!("index: {index}"));
                ui.label(format!("type: {dtype}"));
            });

            if header_response
                .header_response
                .clicked_by(egui::PointerButton::Secondary)
            {
                ui.ctx().copy_text(name.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests_metadata {
    use super::*;
    use crate::{DashboardResult, SourceConfig};

    #[test]
    fn test_metadata_from_dataset() -> DashboardResult<()> {
        let performance = df!("Team" => &["TOR", "MTL"], "GP" => &[82, 60])?;
        let biographical = df!("Country" => &["CAN", "USA"])?;
        let merged = df!(
            "Team" => &["TOR", "MTL"],
            "GP" => &[82, 60],
            "Country" => &["CAN", "USA"]
        )?;

        let config = SourceConfig {
            bio_path: PathBuf::from("data/Bio.parquet"),
            ..Default::default()
        };
        let dataset = Dataset::from_parts(performance, biographical, merged, config);

        let metadata = DatasetMetadata::from_dataset(&dataset);

        assert_eq!((metadata.row_count, metadata.col_count), (2, 3));
        assert_eq!(metadata.sources[0].format, FileExtension::Excel);
        assert_eq!(metadata.sources[0].col_count, 2);
        assert_eq!(metadata.sources[1].format, FileExtension::Parquet);
        assert_eq!(metadata.sources[1].path, PathBuf::from("data/Bio.parquet"));
        Ok(())
    }
}
