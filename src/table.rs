use egui::{Align, Direction, Layout, TextStyle, Ui};
use egui_extras::{Column, TableBuilder, TableRow};
use polars::prelude::*;

/// Decimal places for float cells.
pub const FLOAT_DECIMALS: usize = 2;

/// Formats one cell for display. Nulls and NaN are shown as empty.
pub fn format_cell(value: &AnyValue<'_>, decimals: usize) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Float32(f) if f.is_nan() => String::new(),
        AnyValue::Float64(f) if f.is_nan() => String::new(),
        AnyValue::Float32(f) => format!("{:.*}", decimals, f),
        AnyValue::Float64(f) => format!("{:.*}", decimals, f),
        AnyValue::String(s) => s.to_string(),
        av => av.to_string(),
    }
}

/// Cell layout by data type: numbers right-aligned, integers centered, text left.
fn cell_layout(dtype: &DataType) -> Layout {
    if dtype.is_float() {
        Layout::right_to_left(Align::Center)
    } else if dtype.is_integer() || dtype.is_bool() {
        Layout::centered_and_justified(Direction::LeftToRight)
    } else {
        Layout::left_to_right(Align::Center)
    }
}

/// Renders a DataFrame as a scrollable, striped `egui` table.
///
/// `id` must be unique per page, since several tables can share one page.
pub fn render_table(ui: &mut Ui, id: &str, df: &DataFrame, max_height: f32) {
    let header = |mut table_row: TableRow<'_, '_>| {
        for column_name in df.get_column_names() {
            table_row.col(|ui| {
                ui.strong(column_name.as_str());
            });
        }
    };

    let rows = |mut table_row: TableRow<'_, '_>| {
        let row_index = table_row.index();

        for column in df.columns() {
            let value = match column.get(row_index) {
                Ok(any_value) => format_cell(&any_value, FLOAT_DECIMALS),
                Err(_) => "Error: Value not found".to_string(),
            };
            let layout = cell_layout(column.dtype());

            table_row.col(|ui| {
                ui.with_layout(layout.with_main_wrap(false), |ui| {
                    ui.label(value);
                });
            });
        }
    };

    let style = ui.style();
    let text_height = TextStyle::Body.resolve(style).size;
    let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;

    let column = Column::initial(100.0).at_least(40.0).resizable(true).clip(true);

    TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .max_scroll_height(max_height)
        .columns(column, df.width())
        .column(Column::remainder())
        .auto_shrink([false, true])
        .header(header_height, header)
        .body(|body| {
            body.rows(text_height, df.height(), rows);
        });
}

/// Renders label/value rows (row labels in the first column) as a striped table.
///
/// Used for small computed tables such as the data types and summary statistics.
pub fn render_grid_table(
    ui: &mut Ui,
    id: &str,
    headers: &[&str],
    rows: &[Vec<String>],
    max_height: f32,
) {
    let style = ui.style();
    let text_height = TextStyle::Body.resolve(style).size;
    let header_height = style.spacing.interact_size.y + 2.0 * style.spacing.item_spacing.y;

    TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .max_scroll_height(max_height)
        .columns(Column::auto().at_least(60.0).resizable(true), headers.len())
        .auto_shrink([false, true])
        .header(header_height, |mut table_row| {
            for header in headers {
                table_row.col(|ui| {
                    ui.strong(*header);
                });
            }
        })
        .body(|body| {
            body.rows(text_height, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                for cell in row {
                    table_row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
