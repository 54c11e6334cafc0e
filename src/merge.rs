//! Positional join of the season-stat table with the biographical table.

use crate::{
    BIOGRAPHICAL_SELECTION, DROPPED_PERFORMANCE_COLUMNS, DashboardError, DashboardResult,
    KnownColumn, drop_columns_if_present, has_column, polars::numeric::column_as_strings,
};
use polars::prelude::*;

/// Combines the two source tables column-wise.
///
/// ### Logic
/// 1. Both tables must have the same row count.
/// 2. The six selected biographical columns must exist, and must not already exist
///    in the performance table.
/// 3. When both tables carry `Player`, the names must agree row by row.
/// 4. Drop `Position`, `Season` and `Shooting%` from the performance table (when present).
/// 5. Append the selected biographical columns.
///
/// Output has the performance row count and
/// `performance.width() - dropped + 6` columns.
pub fn merge_tables(performance: &DataFrame, biographical: &DataFrame) -> DashboardResult<DataFrame> {
    // 1. Row alignment.
    if performance.height() != biographical.height() {
        return Err(DashboardError::RowCountMismatch {
            performance: performance.height(),
            biographical: biographical.height(),
        });
    }

    // 2. Required biographical columns.
    let selection: Vec<&str> = BIOGRAPHICAL_SELECTION.iter().map(|c| c.name()).collect();

    let absent: Vec<&str> = selection
        .iter()
        .copied()
        .filter(|name| !has_column(biographical, name))
        .collect();

    if !absent.is_empty() {
        return Err(DashboardError::SchemaMismatch {
            table: "biographical".to_string(),
            reason: format!("missing required columns {absent:?}"),
        });
    }

    let duplicated: Vec<&str> = selection
        .iter()
        .copied()
        .filter(|name| has_column(performance, name))
        .collect();

    if !duplicated.is_empty() {
        return Err(DashboardError::SchemaMismatch {
            table: "performance".to_string(),
            reason: format!("already contains biographical columns {duplicated:?}"),
        });
    }

    // 3. Positional join precondition.
    check_player_alignment(performance, biographical)?;

    // 4. Drop unused performance columns.
    let dropped_names: Vec<&str> = DROPPED_PERFORMANCE_COLUMNS.iter().map(|c| c.name()).collect();
    let (mut merged, dropped) = drop_columns_if_present(performance.clone(), &dropped_names)?;

    // 5. Append the selection.
    let bio_columns: Vec<Column> = biographical.select(selection)?.into_columns();
    merged.hstack_mut(&bio_columns)?;

    tracing::debug!(
        "merge_tables: dropped {dropped:?}, merged shape {:?}",
        merged.shape()
    );

    Ok(merged)
}

/// Fails on the first row whose `Player` differs between the two tables.
///
/// Skipped when either table lacks a `Player` column. Leading and trailing
/// whitespace is ignored; two missing names agree.
fn check_player_alignment(performance: &DataFrame, biographical: &DataFrame) -> DashboardResult<()> {
    let player = KnownColumn::Player.name();

    if !has_column(performance, player) || !has_column(biographical, player) {
        tracing::debug!("Player alignment check skipped: '{player}' not in both tables.");
        return Ok(());
    }

    let left = column_as_strings(performance, player)?;
    let right = column_as_strings(biographical, player)?;

    let mismatch = left.iter().zip(&right).enumerate().find(|(_, (a, b))| {
        a.as_deref().map(str::trim) != b.as_deref().map(str::trim)
    });

    match mismatch {
        Some((row, (a, b))) => Err(DashboardError::RowKeyMismatch {
            row,
            performance: a.clone().unwrap_or_default(),
            biographical: b.clone().unwrap_or_default(),
        }),
        None => Ok(()),
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_merge
#[cfg(test)]
mod tests_merge {
    use super::*;

    fn performance_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["Quinn Hughes", "Cale Makar", "Jake Walman"],
            "Season" => &[20232024, 20232024, 20232024],
            "Team" => &["VAN", "COL", "SJS"],
            "Position" => &["D", "D", "D"],
            "GamesPlayed" => &[82, 77, 50],
            "Points" => &[92, 90, 32],
            "Shooting%" => &[Some(7.4), Some(9.6), None]
        )
    }

    fn biographical_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["Quinn Hughes", "Cale Makar", "Jake Walman"],
            "Country" => &["USA", "CAN", "CAN"],
            "Height" => &[70, 71, 73],
            "Weight" => &[180, 187, 209],
            "DraftYear" => &[Some(2018), Some(2017), None],
            "DraftRound" => &[Some(1), Some(1), None],
            "DraftOverall" => &[Some(7), Some(4), None],
            "BirthCity" => &["Orlando", "Calgary", "Toronto"]
        )
    }

    #[test]
    fn test_merge_column_arithmetic() -> DashboardResult<()> {
        let performance = performance_df()?;
        let biographical = biographical_df()?;

        let merged = merge_tables(&performance, &biographical)?;
        println!("{merged}");

        assert_eq!(merged.height(), performance.height());
        assert_eq!(merged.width(), performance.width() - 3 + 6);
        assert_eq!(
            merged.get_column_names().into_iter().map(|name| name.as_str()).collect::<Vec<&str>>(),
            [
                "Player",
                "Team",
                "GamesPlayed",
                "Points",
                "Country",
                "Height",
                "Weight",
                "DraftYear",
                "DraftRound",
                "DraftOverall"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_merge_without_droppable_columns() -> DashboardResult<()> {
        let performance = df!(
            "Team" => &["TOR", "MTL"],
            "Goals" => &[10, 3]
        )?;
        let biographical = df!(
            "Country" => &["CAN", "SWE"],
            "Height" => &[72, 74],
            "Weight" => &[200, 210],
            "DraftYear" => &[2015, 2016],
            "DraftRound" => &[2, 1],
            "DraftOverall" => &[40, 12]
        )?;

        let merged = merge_tables(&performance, &biographical)?;

        assert_eq!(merged.shape(), (2, 2 + 6));
        Ok(())
    }

    #[test]
    fn test_merge_row_count_mismatch() -> DashboardResult<()> {
        let performance = performance_df()?;
        let biographical = biographical_df()?.head(Some(2));

        let result = merge_tables(&performance, &biographical);

        assert!(matches!(
            result,
            Err(DashboardError::RowCountMismatch {
                performance: 3,
                biographical: 2
            })
        ));
        Ok(())
    }

    #[test]
    fn test_merge_missing_biographical_column() -> DashboardResult<()> {
        let performance = performance_df()?;
        let biographical = biographical_df()?.drop("Weight")?;

        let result = merge_tables(&performance, &biographical);

        match result {
            Err(DashboardError::SchemaMismatch { table, reason }) => {
                assert_eq!(table, "biographical");
                assert!(reason.contains("Weight"));
            }
            other => panic!("Expected SchemaMismatch, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_merge_duplicate_column() -> DashboardResult<()> {
        let mut performance = performance_df()?;
        performance.with_column(Column::new("Country".into(), &["USA", "CAN", "CAN"]))?;

        let result = merge_tables(&performance, &biographical_df()?);

        assert!(matches!(
            result,
            Err(DashboardError::SchemaMismatch { ref table, .. }) if table == "performance"
        ));
        Ok(())
    }

    #[test]
    fn test_merge_player_mismatch() -> DashboardResult<()> {
        let performance = performance_df()?;
        let mut biographical = biographical_df()?;
        biographical.with_column(Column::new(
            "Player".into(),
            &["Quinn Hughes", "Jake Walman", "Cale Makar"],
        ))?;

        let result = merge_tables(&performance, &biographical);

        match result {
            Err(DashboardError::RowKeyMismatch {
                row,
                performance,
                biographical,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(performance, "Cale Makar");
                assert_eq!(biographical, "Jake Walman");
            }
            other => panic!("Expected RowKeyMismatch, got {other:?}"),
        }
        Ok(())
    }
}
