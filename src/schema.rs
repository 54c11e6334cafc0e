//! Typed column schema for the defensemen dataset.
//!
//! Source files from nhl.com use terse headers (`Ctry`, `Draft Yr`, `S/C`, ...).
//! They are renamed to canonical names at load time so the rest of the crate
//! refers to columns through `KnownColumn` instead of string literals.

use crate::{DashboardError, DashboardResult};
use polars::prelude::*;
use std::fmt;

/// Every column the dashboard gives a meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownColumn {
    Player,
    Team,
    Position,
    Season,
    ShootingPct,
    ShootsHand,
    GamesPlayed,
    Goals,
    Assists,
    Points,
    PlusMinus,
    PenaltyMinutes,
    TimeOnIcePerGame,
    Country,
    Height,
    Weight,
    DraftYear,
    DraftRound,
    DraftOverall,
    Division,
    Conference,
}

impl KnownColumn {
    pub const ALL: [KnownColumn; 21] = [
        KnownColumn::Player,
        KnownColumn::Team,
        KnownColumn::Position,
        KnownColumn::Season,
        KnownColumn::ShootingPct,
        KnownColumn::ShootsHand,
        KnownColumn::GamesPlayed,
        KnownColumn::Goals,
        KnownColumn::Assists,
        KnownColumn::Points,
        KnownColumn::PlusMinus,
        KnownColumn::PenaltyMinutes,
        KnownColumn::TimeOnIcePerGame,
        KnownColumn::Country,
        KnownColumn::Height,
        KnownColumn::Weight,
        KnownColumn::DraftYear,
        KnownColumn::DraftRound,
        KnownColumn::DraftOverall,
        KnownColumn::Division,
        KnownColumn::Conference,
    ];

    /// Canonical column name used inside the merged table.
    pub fn name(self) -> &'static str {
        match self {
            KnownColumn::Player => "Player",
            KnownColumn::Team => "Team",
            KnownColumn::Position => "Position",
            KnownColumn::Season => "Season",
            KnownColumn::ShootingPct => "Shooting%",
            KnownColumn::ShootsHand => "ShootsHand",
            KnownColumn::GamesPlayed => "GamesPlayed",
            KnownColumn::Goals => "Goals",
            KnownColumn::Assists => "Assists",
            KnownColumn::Points => "Points",
            KnownColumn::PlusMinus => "PlusMinus",
            KnownColumn::PenaltyMinutes => "PenaltyMinutes",
            KnownColumn::TimeOnIcePerGame => "TOI/GP",
            KnownColumn::Country => "Country",
            KnownColumn::Height => "Height",
            KnownColumn::Weight => "Weight",
            KnownColumn::DraftYear => "DraftYear",
            KnownColumn::DraftRound => "DraftRound",
            KnownColumn::DraftOverall => "DraftOverall",
            KnownColumn::Division => "Division",
            KnownColumn::Conference => "Conference",
        }
    }

    /// Header used by the nhl.com exports, when it differs from the canonical name.
    pub fn source_alias(self) -> Option<&'static str> {
        match self {
            KnownColumn::Position => Some("Pos"),
            KnownColumn::ShootingPct => Some("S%"),
            KnownColumn::ShootsHand => Some("S/C"),
            KnownColumn::GamesPlayed => Some("GP"),
            KnownColumn::Goals => Some("G"),
            KnownColumn::Assists => Some("A"),
            KnownColumn::Points => Some("P"),
            KnownColumn::PlusMinus => Some("+/-"),
            KnownColumn::PenaltyMinutes => Some("PIM"),
            KnownColumn::Country => Some("Ctry"),
            KnownColumn::Height => Some("Ht"),
            KnownColumn::Weight => Some("Wt"),
            KnownColumn::DraftYear => Some("Draft Yr"),
            KnownColumn::DraftRound => Some("Round"),
            KnownColumn::DraftOverall => Some("Overall"),
            KnownColumn::Division => Some("Div"),
            KnownColumn::Conference => Some("Conf"),
            _ => None,
        }
    }
}

impl fmt::Display for KnownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Performance columns removed before the merge. Absence is not an error.
pub const DROPPED_PERFORMANCE_COLUMNS: [KnownColumn; 3] = [
    KnownColumn::Position,
    KnownColumn::Season,
    KnownColumn::ShootingPct,
];

/// Biographical columns carried into the merged table. All are required.
pub const BIOGRAPHICAL_SELECTION: [KnownColumn; 6] = [
    KnownColumn::Country,
    KnownColumn::Height,
    KnownColumn::Weight,
    KnownColumn::DraftYear,
    KnownColumn::DraftRound,
    KnownColumn::DraftOverall,
];

/// Non-numeric columns that are identifiers or durations, not categories.
pub const EXCLUDED_CATEGORICAL: [KnownColumn; 3] = [
    KnownColumn::Player,
    KnownColumn::Team,
    KnownColumn::TimeOnIcePerGame,
];

/// Columns the scatter plot may be colored by.
pub const COLOR_CANDIDATES: [KnownColumn; 5] = [
    KnownColumn::ShootsHand,
    KnownColumn::Country,
    KnownColumn::Division,
    KnownColumn::Conference,
    KnownColumn::Team,
];

/// Fields attached to each scatter point for hover display.
pub const HOVER_FIELDS: [KnownColumn; 7] = [
    KnownColumn::Player,
    KnownColumn::Team,
    KnownColumn::GamesPlayed,
    KnownColumn::Points,
    KnownColumn::Country,
    KnownColumn::Division,
    KnownColumn::Conference,
];

/// Draft columns filled with their mean on the imputation tab.
pub const IMPUTED_COLUMNS: [KnownColumn; 3] = [
    KnownColumn::DraftYear,
    KnownColumn::DraftRound,
    KnownColumn::DraftOverall,
];

/// Which subset of columns a user selection must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Numeric,
    Categorical,
    ColorGroup,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnRole::Numeric => "numeric",
            ColumnRole::Categorical => "categorical",
            ColumnRole::ColorGroup => "color group",
        };
        f.write_str(label)
    }
}

/// Integer and float columns. Booleans are not numeric here.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Returns `true` if the DataFrame has a column with this name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.schema().contains(name)
}

/// Names of every numeric column, in table order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.schema()
        .iter()
        .filter(|(_, dtype)| is_numeric_dtype(dtype))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Non-numeric columns offered by the distribution view.
pub fn categorical_columns(df: &DataFrame) -> Vec<String> {
    let excluded: Vec<&str> = EXCLUDED_CATEGORICAL.iter().map(|c| c.name()).collect();
    df.schema()
        .iter()
        .filter(|(name, dtype)| !is_numeric_dtype(dtype) && !excluded.contains(&name.as_str()))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Color-group candidates that exist in the table.
pub fn color_columns(df: &DataFrame) -> Vec<String> {
    COLOR_CANDIDATES
        .iter()
        .map(|c| c.name())
        .filter(|name| has_column(df, name))
        .map(str::to_string)
        .collect()
}

/// Hover fields that exist in the table.
pub fn hover_columns(df: &DataFrame) -> Vec<String> {
    HOVER_FIELDS
        .iter()
        .map(|c| c.name())
        .filter(|name| has_column(df, name))
        .map(str::to_string)
        .collect()
}

/// Checks that `column` belongs to the subset allowed for `role`.
///
/// Returns the column name on success so callers can chain the validated value.
pub fn validate_selection<'a>(
    df: &DataFrame,
    column: &'a str,
    role: ColumnRole,
) -> DashboardResult<&'a str> {
    let allowed = match role {
        ColumnRole::Numeric => numeric_columns(df),
        ColumnRole::Categorical => categorical_columns(df),
        ColumnRole::ColorGroup => color_columns(df),
    };

    if allowed.iter().any(|name| name == column) {
        Ok(column)
    } else {
        Err(DashboardError::InvalidSelection {
            column: column.to_string(),
            role: role.to_string(),
            allowed,
        })
    }
}

/// Renames nhl.com header aliases to canonical names.
///
/// A rename is skipped when the canonical name is already present,
/// so a file that mixes both spellings keeps its canonical column.
pub fn canonicalize_headers(mut df: DataFrame) -> PolarsResult<DataFrame> {
    for column in KnownColumn::ALL {
        let Some(alias) = column.source_alias() else {
            continue;
        };

        if has_column(&df, alias) && !has_column(&df, column.name()) {
            tracing::debug!("Renaming column '{}' to '{}'", alias, column.name());
            df.rename(alias, column.name().into())?;
        }
    }
    Ok(df)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_schema
#[cfg(test)]
mod tests_schema {
    use super::*;

    fn sample_df() -> PolarsResult<DataFrame> {
        df!(
            "Player" => &["Quinn Hughes", "Cale Makar"],
            "Team" => &["VAN", "COL"],
            "TOI/GP" => &["25:29", "24:50"],
            "ShootsHand" => &["L", "R"],
            "Country" => &["USA", "CAN"],
            "Points" => &[76, 92],
            "Height" => &[70.0, 71.0]
        )
    }

    #[test]
    fn test_canonicalize_headers_renames_aliases() -> DashboardResult<()> {
        let df = df!(
            "Player" => &["A"],
            "Ctry" => &["SWE"],
            "Draft Yr" => &[Some(2017)],
            "S/C" => &["L"],
            "EVG" => &[3]
        )?;

        let df = canonicalize_headers(df)?;
        let names: Vec<&str> = df.get_column_names().into_iter().map(|name| name.as_str()).collect::<Vec<&str>>();

        assert_eq!(names, ["Player", "Country", "DraftYear", "ShootsHand", "EVG"]);
        Ok(())
    }

    #[test]
    fn test_canonicalize_headers_keeps_existing_canonical() -> DashboardResult<()> {
        let df = df!(
            "Country" => &["CAN"],
            "Ctry" => &["SWE"]
        )?;

        let df = canonicalize_headers(df)?;

        assert_eq!(df.get_column_names().into_iter().map(|name| name.as_str()).collect::<Vec<&str>>(), ["Country", "Ctry"]);
        Ok(())
    }

    #[test]
    fn test_categorical_columns_excludes_identifiers() -> DashboardResult<()> {
        let df = sample_df()?;
        assert_eq!(categorical_columns(&df), ["ShootsHand", "Country"]);
        assert_eq!(numeric_columns(&df), ["Points", "Height"]);
        Ok(())
    }

    #[test]
    fn test_color_and_hover_columns_only_present() -> DashboardResult<()> {
        let df = sample_df()?;
        assert_eq!(color_columns(&df), ["ShootsHand", "Country", "Team"]);
        assert_eq!(hover_columns(&df), ["Player", "Team", "Points", "Country"]);
        Ok(())
    }

    #[test]
    fn test_validate_selection() -> DashboardResult<()> {
        let df = sample_df()?;

        assert_eq!(validate_selection(&df, "Points", ColumnRole::Numeric)?, "Points");

        let result = validate_selection(&df, "Country", ColumnRole::Numeric);
        assert!(
            matches!(
                &result,
                Err(DashboardError::InvalidSelection { column, allowed, .. })
                    if column == "Country" && allowed.len() == 2
            ),
            "Expected InvalidSelection, got {result:?}"
        );

        let result = validate_selection(&df, "Player", ColumnRole::Categorical);
        assert!(result.is_err(), "Player is not a category");
        Ok(())
    }
}
