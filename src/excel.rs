//! Excel workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) read through `calamine`.
//!
//! The first worksheet is read; its first row holds the headers. Column types are
//! inferred from the cells: all-integer columns become `Int64`, numeric columns
//! `Float64`, anything else `String`.

use crate::{DashboardError, DashboardResult};
use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::*;
use std::path::Path;

/// Reads the first worksheet of a workbook. Cells equal to a null marker are null.
pub fn read_first_sheet(path: &Path, null_values: &[&str]) -> DashboardResult<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();

    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        DashboardError::FileType(format!("No worksheet in file: `{}`", path.display()))
    })??;

    tracing::debug!(
        "Read sheet '{sheet_name}' from {}: {:?} cells",
        path.display(),
        range.get_size()
    );

    Ok(range_to_dataframe(&range, null_values)?)
}

/// Converts a cell range to a `DataFrame`, using the first row as headers.
pub fn range_to_dataframe(range: &Range<Data>, null_values: &[&str]) -> PolarsResult<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = match cell {
                Data::Empty => format!("column_{}", index + 1),
                other => other.to_string().trim().to_string(),
            };
            let cells: Vec<Option<&Data>> = body
                .iter()
                .map(|row| row.get(index).filter(|cell| !is_missing(cell, null_values)))
                .collect();
            cells_to_column(&name, &cells)
        })
        .collect();

    DataFrame::new_infer_height(columns)
}

fn is_missing(cell: &Data, null_values: &[&str]) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(text) => null_values.contains(&text.trim()),
        _ => false,
    }
}

fn as_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(value) => Some(*value as f64),
        Data::Float(value) => Some(*value),
        _ => None,
    }
}

fn cells_to_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let present = || cells.iter().flatten();
    let any_present = present().next().is_some();
    let all_numeric = any_present && present().all(|cell| as_number(cell).is_some());

    if !all_numeric {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| cell.map(|c| c.to_string()))
            .collect();
        return Column::new(name.into(), values);
    }

    let numbers: Vec<Option<f64>> = cells.iter().map(|cell| cell.and_then(as_number)).collect();
    let integral = numbers
        .iter()
        .flatten()
        .all(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64);

    if integral {
        let values: Vec<Option<i64>> = numbers.iter().map(|v| v.map(|v| v as i64)).collect();
        Column::new(name.into(), values)
    } else {
        Column::new(name.into(), numbers)
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_excel
#[cfg(test)]
mod tests_excel {
    use super::*;

    const MARKERS: [&str; 2] = ["", "--"];

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_column_types_and_markers() -> PolarsResult<()> {
        let range = sheet(&[
            &[text("Player"), text("Draft Yr"), text("Ht"), text("Ctry")],
            &[text("Quinn Hughes"), Data::Float(2018.0), Data::Float(70.5), text("USA")],
            &[text("Jake Walman"), text("--"), Data::Int(74), Data::Empty],
        ]);

        let df = range_to_dataframe(&range, &MARKERS)?;
        println!("{df}");

        assert_eq!(df.shape(), (2, 4));
        assert_eq!(df.column("Player")?.dtype(), &DataType::String);
        assert_eq!(df.column("Draft Yr")?.dtype(), &DataType::Int64);
        assert_eq!(df.column("Draft Yr")?.null_count(), 1);
        assert_eq!(df.column("Ht")?.dtype(), &DataType::Float64);
        assert_eq!(df.column("Ctry")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn test_mixed_column_is_text() -> PolarsResult<()> {
        let range = sheet(&[&[text("Team")], &[text("TOR")], &[Data::Int(7)]]);

        let df = range_to_dataframe(&range, &MARKERS)?;

        assert_eq!(df.column("Team")?.dtype(), &DataType::String);
        assert_eq!(df.column("Team")?.null_count(), 0);
        Ok(())
    }

    #[test]
    fn test_blank_header_is_named_by_position() -> PolarsResult<()> {
        let range = sheet(&[&[text("Player"), Data::Empty], &[text("A"), Data::Int(1)]]);

        let df = range_to_dataframe(&range, &MARKERS)?;

        assert_eq!(df.get_column_names().into_iter().map(|name| name.as_str()).collect::<Vec<&str>>(), ["Player", "column_2"]);
        Ok(())
    }
}
