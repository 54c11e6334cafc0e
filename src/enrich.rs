//! Derives `Division` and `Conference` from the `Team` column.

use crate::KnownColumn;
use polars::prelude::*;
use std::{collections::HashMap, fmt, sync::LazyLock};

/// NHL division. `Unknown` covers codes missing from every roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Division {
    Atlantic,
    Metropolitan,
    Central,
    Pacific,
    Unknown,
}

/// NHL conference. `Unknown` follows from an unknown division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conference {
    Eastern,
    Western,
    Unknown,
}

impl Division {
    pub fn as_str(self) -> &'static str {
        match self {
            Division::Atlantic => "ATL",
            Division::Metropolitan => "MET",
            Division::Central => "CEN",
            Division::Pacific => "PAC",
            Division::Unknown => "Unknown",
        }
    }

    pub fn conference(self) -> Conference {
        match self {
            Division::Atlantic | Division::Metropolitan => Conference::Eastern,
            Division::Central | Division::Pacific => Conference::Western,
            Division::Unknown => Conference::Unknown,
        }
    }
}

impl Conference {
    pub fn as_str(self) -> &'static str {
        match self {
            Conference::Eastern => "EC",
            Conference::Western => "WC",
            Conference::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Division rosters for the 2024-25 season.
///
/// Relocations and expansions are edits to this table only.
pub const DIVISION_ROSTERS: [(Division, [&str; 8]); 4] = [
    (
        Division::Atlantic,
        ["BOS", "BUF", "DET", "FLA", "MTL", "OTT", "TBL", "TOR"],
    ),
    (
        Division::Metropolitan,
        ["CAR", "CBJ", "NJD", "NYI", "NYR", "PHI", "PIT", "WSH"],
    ),
    (
        Division::Central,
        ["CHI", "COL", "DAL", "MIN", "NSH", "STL", "UTA", "WPG"],
    ),
    (
        Division::Pacific,
        ["ANA", "CGY", "EDM", "LAK", "SJS", "SEA", "VAN", "VGK"],
    ),
];

/// Team code to division, built once from `DIVISION_ROSTERS`.
static TEAM_DIVISIONS: LazyLock<HashMap<&'static str, Division>> = LazyLock::new(|| {
    DIVISION_ROSTERS
        .iter()
        .flat_map(|(division, teams)| teams.iter().map(move |team| (*team, *division)))
        .collect()
});

/// Division of a team code. Total: unmapped codes yield `Division::Unknown`.
pub fn get_division(team: &str) -> Division {
    TEAM_DIVISIONS
        .get(team.trim())
        .copied()
        .unwrap_or(Division::Unknown)
}

/// Conference of a team code. Total: unmapped codes yield `Conference::Unknown`.
pub fn get_conference(team: &str) -> Conference {
    get_division(team).conference()
}

/// Appends `Division` and `Conference` columns derived from `Team`.
///
/// Without a `Team` column every row gets `Unknown`. Null team codes also map to `Unknown`.
pub fn add_division_columns(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let team_name = KnownColumn::Team.name();
    let height = df.height();

    let divisions: Vec<Division> = if df.schema().contains(team_name) {
        let teams = df.column(team_name)?.cast(&DataType::String)?;
        teams
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|team| team.map_or(Division::Unknown, get_division))
            .collect()
    } else {
        tracing::warn!("No '{team_name}' column: Division and Conference set to Unknown.");
        vec![Division::Unknown; height]
    };

    let division_values: Vec<&str> = divisions.iter().map(|d| d.as_str()).collect();
    let conference_values: Vec<&str> = divisions.iter().map(|d| d.conference().as_str()).collect();

    df.with_column(Column::new(
        KnownColumn::Division.name().into(),
        division_values,
    ))?;
    df.with_column(Column::new(
        KnownColumn::Conference.name().into(),
        conference_values,
    ))?;

    tracing::debug!("Division and Conference added. Shape: {:?}", df.shape());
    Ok(df)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_enrich
#[cfg(test)]
mod tests_enrich {
    use super::*;

    #[test]
    fn test_division_and_conference_lookup() {
        assert_eq!(get_division("BOS"), Division::Atlantic);
        assert_eq!(get_conference("BOS"), Conference::Eastern);
        assert_eq!(get_division("XXX"), Division::Unknown);
        assert_eq!(get_conference("XXX"), Conference::Unknown);
        assert_eq!(get_division("SEA").as_str(), "PAC");
        assert_eq!(get_conference("WPG").as_str(), "WC");
        assert_eq!(get_division(""), Division::Unknown);
    }

    #[test]
    fn test_rosters_are_disjoint_and_complete() {
        // 32 teams, each in exactly one division.
        assert_eq!(TEAM_DIVISIONS.len(), 32);
        for (division, teams) in DIVISION_ROSTERS {
            for team in teams {
                assert_eq!(get_division(team), division, "team {team}");
            }
        }
    }

    #[test]
    fn test_add_division_columns() -> PolarsResult<()> {
        let df = df!(
            "Player" => &["A", "B", "C", "D"],
            "Team" => &[Some("TOR"), Some("CBJ"), Some("XXX"), None]
        )?;

        let df = add_division_columns(df)?;
        println!("Output DF:\n{df}");

        let expected = df!(
            "Player" => &["A", "B", "C", "D"],
            "Team" => &[Some("TOR"), Some("CBJ"), Some("XXX"), None],
            "Division" => &["ATL", "MET", "Unknown", "Unknown"],
            "Conference" => &["EC", "EC", "Unknown", "Unknown"]
        )?;

        assert!(df.equals_missing(&expected));
        Ok(())
    }

    #[test]
    fn test_add_division_columns_without_team() -> PolarsResult<()> {
        let df = df!("Player" => &["A", "B"])?;

        let df = add_division_columns(df)?;

        let expected = df!(
            "Player" => &["A", "B"],
            "Division" => &["Unknown", "Unknown"],
            "Conference" => &["Unknown", "Unknown"]
        )?;
        assert!(df.equals_missing(&expected));
        Ok(())
    }
}
