use crate::{
    DEFAULT_BIO_PATH, DEFAULT_CSV_DELIMITER, DEFAULT_INFER_SCHEMA_ROWS, DEFAULT_SEASON_PATH,
    DashboardError, DashboardResult, NULL_VALUES,
};

use clap::Parser;
use std::path::PathBuf;

// https://stackoverflow.com/questions/74068168/clap-rs-not-printing-colors-during-help
fn get_styles() -> clap::builder::Styles {
    let cyan = anstyle::Color::Ansi(anstyle::AnsiColor::Cyan);
    let green = anstyle::Color::Ansi(anstyle::AnsiColor::Green);
    let yellow = anstyle::Color::Ansi(anstyle::AnsiColor::Yellow);

    clap::builder::Styles::styled()
        .placeholder(anstyle::Style::new().fg_color(Some(yellow)))
        .usage(anstyle::Style::new().fg_color(Some(cyan)).bold())
        .header(
            anstyle::Style::new()
                .fg_color(Some(cyan))
                .bold()
                .underline(),
        )
        .literal(anstyle::Style::new().fg_color(Some(green)))
}

// https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template
const APPLET_TEMPLATE: &str = "\
{before-help}
{about-with-newline}
{usage-heading} {usage}

{all-args}
{after-help}";

const EX1: &str = r#" puck-view"#;
const EX2: &str = r#" puck-view -b data/Bio.csv -s data/SS.csv"#;
const EX3: &str = r#" puck-view -b bio.parquet -s season.parquet"#;
const EX4: &str = r#" puck-view -d ";" -n "\"\", --, N/A""#;

/// Command-line arguments for the Puck View dashboard.
#[derive(Parser, Debug, Clone)]
#[command(
    // Read from `Cargo.toml`.
    author, version, about,
    long_about = None,
    next_line_help = true,
    help_template = APPLET_TEMPLATE,
    styles=get_styles(),
    after_help = format!("EXAMPLES:\n{EX1}\n{EX2}\n{EX3}\n{EX4}")
)]
pub struct Arguments {
    /// Biographical table (one row per player).
    #[arg(
        short = 'b',
        long = "bio",
        value_name = "FILE_PATH",
        default_value = DEFAULT_BIO_PATH,
        help = "Biographical table (Excel/CSV/JSON/NDJSON/Parquet)",
        long_help = "Path to the biographical table exported from nhl.com \
        (country, height, weight, draft year/round/overall)."
    )]
    pub bio_path: PathBuf,

    /// Season performance table (one row per player, same order as the biographical table).
    #[arg(
        short = 's',
        long = "season",
        value_name = "FILE_PATH",
        default_value = DEFAULT_SEASON_PATH,
        help = "Season-stat table (Excel/CSV/JSON/NDJSON/Parquet)",
        long_help = "Path to the season-stat table exported from nhl.com.\n\
        Row i must describe the same player as row i of the biographical table."
    )]
    pub season_path: PathBuf,

    /// CSV delimiter character. [Default: ',']
    #[arg(
        short = 'd',
        long,
        default_value = DEFAULT_CSV_DELIMITER,
        help = "CSV delimiter character",
        long_help = "Sets the CSV delimiter.\n\
        Auto-detect tries common separators (, ; | \\t :) if initial parse fails.",
        value_parser = validate_delimiter
    )]
    pub delimiter: String,

    /// Comma-separated values to treat as NULL.
    #[arg(
        short = 'n',
        long,
        value_name = "NULL_LIST",
        default_value = NULL_VALUES,
        help = "Comma-separated values interpreted as NULL",
        long_help = "Specify custom null strings. Whitespace trimmed.\n\
        nhl.com exports use \"--\" for undrafted players and missing faceoff data."
    )]
    pub null_values: String,

    /// Rows scanned for type inference.
    #[arg(
        short = 'i',
        long,
        value_name = "ROWS",
        default_value_t = DEFAULT_INFER_SCHEMA_ROWS,
        help = "Rows scanned to infer column types"
    )]
    pub infer_schema_rows: usize,
}

impl Arguments {
    /// Build `Arguments` struct.
    pub fn build() -> Arguments {
        Arguments::parse()
    }
}

/// clap validator for '--delimiter': exactly one single-byte character.
fn validate_delimiter(s: &str) -> DashboardResult<String> {
    if s.len() == 1 {
        Ok(s.to_string())
    } else {
        Err(DashboardError::InvalidArgument {
            arg_name: "--delimiter".to_string(),
            reason: format!("expected a single ASCII character, got '{s}'"),
        })
    }
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//

/// Run tests with:
/// cargo test -- --show-output tests_args`
#[cfg(test)]
mod tests_args {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Arguments::parse_from(["puck-view"]);

        assert_eq!(args.bio_path, PathBuf::from(DEFAULT_BIO_PATH));
        assert_eq!(args.season_path, PathBuf::from(DEFAULT_SEASON_PATH));
        assert_eq!(args.delimiter, DEFAULT_CSV_DELIMITER);
        assert_eq!(args.null_values, NULL_VALUES);
        assert_eq!(args.infer_schema_rows, DEFAULT_INFER_SCHEMA_ROWS);
    }

    #[test]
    fn test_args_all_options_short() {
        let args = Arguments::parse_from([
            "puck-view",
            "-b",
            "bio.parquet",
            "-s",
            "season.parquet",
            "-d",
            ";",
            "-n",
            "NA,-99",
            "-i",
            "50",
        ]);

        assert_eq!(args.bio_path, PathBuf::from("bio.parquet"));
        assert_eq!(args.season_path, PathBuf::from("season.parquet"));
        assert_eq!(args.delimiter, ";");
        assert_eq!(args.null_values, "NA,-99");
        assert_eq!(args.infer_schema_rows, 50);
    }

    #[test]
    fn test_args_all_options_long() {
        let args = Arguments::parse_from([
            "puck-view",
            "--bio",
            "Bio.json",
            "--season",
            "SS.ndjson",
            "--delimiter",
            "|",
            "--null-values",
            "\"-\", \"?\"",
            "--infer-schema-rows",
            "1000",
        ]);

        assert_eq!(args.bio_path, PathBuf::from("Bio.json"));
        assert_eq!(args.season_path, PathBuf::from("SS.ndjson"));
        assert_eq!(args.delimiter, "|");
        assert_eq!(args.null_values, "\"-\", \"?\"");
        assert_eq!(args.infer_schema_rows, 1000);
    }

    #[test]
    fn test_args_rejects_long_delimiter() {
        let result = Arguments::try_parse_from(["puck-view", "-d", ";;"]);
        assert!(result.is_err());
    }
}
