use polars::prelude::PolarsError;
use std::{io, path::PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/**
Result type to simplify function signatures.

Functions can return `DashboardResult<T>` and then use `?` to automatically propagate errors.
*/
pub type DashboardResult<T> = Result<T, DashboardError>;

/**
Custom error type for Puck View.

Startup errors (`SourceLoad`, and any merge failure) abort the session.
Errors raised while computing a single page are rendered inline on that page.
*/
#[derive(Error, Debug)]
pub enum DashboardError {
    // Wrapper for standard IO errors.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // Wrapper for Polars errors (from the Polars library).
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    // Wrapper for spreadsheet errors (from the calamine library).
    #[error("Excel error: {0}")]
    Excel(#[from] calamine::Error),

    // Wrapper for Tokio JoinErrors, occurring when blocking reads fail to join.
    #[error("Tokio JoinError: {0}")]
    TokioJoin(#[from] JoinError),

    /// A source table could not be loaded. Fatal at startup.
    #[error("Failed to load {table} table from {path:#?}\n{source}")]
    SourceLoad {
        table: String,
        path: PathBuf,
        #[source]
        source: Box<DashboardError>,
    },

    /// A column required by the merge or by a view is absent (or duplicated).
    #[error("Schema mismatch in {table} table: {reason}")]
    SchemaMismatch { table: String, reason: String },

    /// The two source tables cannot be aligned by row position.
    #[error(
        "Row count mismatch: performance table has {performance} rows, \
         biographical table has {biographical} rows"
    )]
    RowCountMismatch {
        performance: usize,
        biographical: usize,
    },

    /// Both tables name their players and the names disagree at `row`.
    #[error(
        "Row {row} is not the same player in both tables: \
         '{performance}' (performance) vs '{biographical}' (biographical)"
    )]
    RowKeyMismatch {
        row: usize,
        performance: String,
        biographical: String,
    },

    /// A user selection is not a member of the allowed column subset.
    #[error("Column '{column}' is not a valid {role} selection. Allowed: {allowed:?}")]
    InvalidSelection {
        column: String,
        role: String,
        allowed: Vec<String>,
    },

    // Errors encountered while parsing CSV data (e.g., inconsistent columns, invalid data).
    #[error("CSV parsing error: {0}")]
    CsvParsing(String),

    // Errors related to the file type (e.g., unsupported file extension, incorrect file format).
    #[error("File type error: {0}")]
    FileType(String),

    // Indicates that a specified file could not be found, storing the attempted path.
    #[error("File not found: {0:#?}")]
    FileNotFound(PathBuf),

    // Indicates an invalid CSV delimiter was provided (empty or too long).
    #[error("Invalid CSV delimiter: '{0}'")]
    InvalidDelimiter(String),

    #[error("Invalid value for command-line argument '{arg_name}': {reason}")]
    InvalidArgument { arg_name: String, reason: String },
}

impl DashboardError {
    /// Wraps any loader failure into a `SourceLoad` error for the given table.
    pub fn source_load(table: impl Into<String>, path: impl Into<PathBuf>, err: Self) -> Self {
        DashboardError::SourceLoad {
            table: table.into(),
            path: path.into(),
            source: Box::new(err),
        }
    }
}
