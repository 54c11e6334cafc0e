//! Raw source adapter: reads the biographical and season-stat tables from disk.
//!
//! No semantic transformation happens here beyond header canonicalization and
//! null-marker handling; merging and enrichment live in `merge.rs` and `enrich.rs`.

use crate::{
    Arguments, DashboardError, DashboardResult, FileExtension, UniqueElements,
    canonicalize_headers, excel::read_first_sheet, polars::replace::replace_markers_with_null,
};
use polars::prelude::*;
use tokio::task::spawn_blocking;

use std::{
    fmt::{self, Debug},
    fs::File,
    num::NonZero,
    path::{Path, PathBuf},
};

// --- Constants ---

/// Values treated as null/missing during parsing. nhl.com writes `--` for "no value".
/// The `r#""#` syntax denotes a raw string literal, avoiding the need to escape quotes.
pub static NULL_VALUES: &str = r#""", --"#;

/// Default delimiter used for CSV parsing if not specified or detected.
pub static DEFAULT_CSV_DELIMITER: &str = ",";

/// Biographical table read when no path is given.
pub static DEFAULT_BIO_PATH: &str = "Bio.xlsx";

/// Season-stat table read when no path is given.
pub static DEFAULT_SEASON_PATH: &str = "SS.xlsx";

pub const DEFAULT_INFER_SCHEMA_ROWS: usize = 200;

/// Which of the two source tables a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Biographical,
    Performance,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Biographical => f.write_str("biographical"),
            TableKind::Performance => f.write_str("performance"),
        }
    }
}

// --- SourceConfig Struct ---

/// Where the two source tables live and how to parse them.
///
/// Built once from `Arguments` in `main.rs` and kept inside the `Dataset` for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceConfig {
    /// Path to the biographical table.
    pub bio_path: PathBuf,
    /// Path to the season performance table.
    pub season_path: PathBuf,
    /// The character used to separate columns in a CSV file.
    pub csv_delimiter: String,
    /// Comma-separated string of values to interpret as nulls.
    pub null_values: String,
    /// Maximum rows to scan for schema inference (CSV, JSON, NDJson).
    pub infer_schema_rows: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            bio_path: PathBuf::from(DEFAULT_BIO_PATH),
            season_path: PathBuf::from(DEFAULT_SEASON_PATH),
            csv_delimiter: DEFAULT_CSV_DELIMITER.to_string(),
            null_values: NULL_VALUES.to_string(),
            infer_schema_rows: DEFAULT_INFER_SCHEMA_ROWS,
        }
    }
}

/// The two tables as read from disk, headers canonicalized.
#[derive(Debug, Clone)]
pub struct RawSources {
    pub biographical: DataFrame,
    pub performance: DataFrame,
}

impl SourceConfig {
    /// Creates a new `SourceConfig` from command-line `Arguments`.
    pub fn new(args: &Arguments) -> Self {
        SourceConfig {
            bio_path: args.bio_path.clone(),
            season_path: args.season_path.clone(),
            csv_delimiter: args.delimiter.clone(),
            null_values: args.null_values.clone(),
            infer_schema_rows: args.infer_schema_rows,
        }
    }

    /// Path configured for a table.
    pub fn path(&self, kind: TableKind) -> &Path {
        match kind {
            TableKind::Biographical => &self.bio_path,
            TableKind::Performance => &self.season_path,
        }
    }

    /// Loads both tables concurrently.
    ///
    /// Any failure is reported as `DashboardError::SourceLoad` naming the table and path.
    pub async fn load_sources(&self) -> DashboardResult<RawSources> {
        let (biographical, performance) = tokio::try_join!(
            self.load_table(TableKind::Biographical),
            self.load_table(TableKind::Performance),
        )?;

        Ok(RawSources {
            biographical,
            performance,
        })
    }

    /// Loads one table, wrapping any failure as `SourceLoad`.
    pub async fn load_table(&self, kind: TableKind) -> DashboardResult<DataFrame> {
        let path = self.path(kind);

        let df = self
            .read_table(path)
            .await
            .map_err(|err| DashboardError::source_load(kind.to_string(), path, err))?;

        tracing::info!(
            "Loaded {kind} table from {}. Shape: {:?}",
            path.display(),
            df.shape()
        );
        Ok(df)
    }

    /// Determines the `FileExtension` and loads the DataFrame with the appropriate Polars reader.
    async fn read_table(&self, path: &Path) -> DashboardResult<DataFrame> {
        if !path.is_file() {
            return Err(DashboardError::FileNotFound(path.to_path_buf()));
        }

        let extension = FileExtension::from_path(path);

        let df = match &extension {
            FileExtension::Csv => self.read_csv_data(path).await?,
            FileExtension::Json => self.read_json_data(path).await?,
            FileExtension::NDJson => self.read_ndjson_data(path).await?,
            FileExtension::Parquet => self.read_parquet_data(path).await?,
            FileExtension::Excel => self.read_excel_data(path).await?,
            FileExtension::Unknown(ext) => {
                return Err(DashboardError::FileType(format!(
                    "Unsupported extension: `{}` for file: `{}`",
                    ext,
                    path.display()
                )));
            }
            FileExtension::Missing => {
                return Err(DashboardError::FileType(format!(
                    "Missing extension for file: `{}`",
                    path.display()
                )));
            }
        };

        // CSV and Excel markers are handled by the reader; other formats keep them as text.
        let df = match extension {
            FileExtension::Csv | FileExtension::Excel => df,
            _ => replace_markers_with_null(df, &self.parse_null_values())?,
        };

        Ok(canonicalize_headers(df)?)
    }

    // --- Data Reading Helper Methods ---

    /// Reads a standard JSON file into a Polars DataFrame.
    async fn read_json_data(&self, path: &Path) -> DashboardResult<DataFrame> {
        tracing::debug!("Reading JSON data from: {}", path.display());
        let file = File::open(path)?;
        let infer_schema_rows = self.infer_schema_rows;

        let df = execute_polars_blocking(move || {
            JsonReader::new(file)
                .infer_schema_len(NonZero::new(infer_schema_rows))
                .finish()
        })
        .await?;

        tracing::debug!("JSON read complete. Shape: {:?}", df.shape());
        Ok(df)
    }

    /// Reads a Newline-Delimited JSON (NDJson / JSON Lines) file into a Polars DataFrame.
    async fn read_ndjson_data(&self, path: &Path) -> DashboardResult<DataFrame> {
        tracing::debug!("Reading NDJSON data from: {}", path.display());

        let plpath = PlRefPath::try_from_path(path)?;
        let infer_schema_rows = self.infer_schema_rows;

        let df = execute_polars_blocking(move || {
            LazyJsonLineReader::new(plpath)
                .low_memory(false)
                .with_infer_schema_length(NonZero::new(infer_schema_rows))
                .with_ignore_errors(true)
                .finish()?
                .collect()
        })
        .await?;

        tracing::debug!("NDJSON read complete. Shape: {:?}", df.shape());
        Ok(df)
    }

    /// Reads an Apache Parquet file into a Polars DataFrame.
    async fn read_parquet_data(&self, path: &Path) -> DashboardResult<DataFrame> {
        tracing::debug!("Reading Parquet data from: {}", path.display());

        let plpath = PlRefPath::try_from_path(path)?;
        let args = ScanArgsParquet {
            low_memory: false,
            ..Default::default()
        };

        let df = execute_polars_blocking(move || LazyFrame::scan_parquet(plpath, args)?.collect())
            .await?;

        tracing::debug!("Parquet read complete. Shape: {:?}", df.shape());
        Ok(df)
    }

    /// Reads the first worksheet of a spreadsheet on a blocking thread.
    async fn read_excel_data(&self, path: &Path) -> DashboardResult<DataFrame> {
        tracing::debug!("Reading Excel data from: {}", path.display());

        let path = path.to_path_buf();
        let null_values: Vec<String> = self
            .parse_null_values()
            .into_iter()
            .map(str::to_string)
            .collect();

        let df = spawn_blocking(move || {
            let markers: Vec<&str> = null_values.iter().map(String::as_str).collect();
            read_first_sheet(&path, &markers)
        })
        .await??;

        tracing::debug!("Excel read complete. Shape: {:?}", df.shape());
        Ok(df)
    }

    /// Reads a CSV file, trying common delimiters when the configured one yields a single column.
    async fn read_csv_data(&self, path: &Path) -> DashboardResult<DataFrame> {
        let initial_separator = self.get_csv_separator()?;

        // List of common delimiters to try, starting with the configured one.
        let mut delimiters_to_try = vec![initial_separator, b',', b';', b'|', b'\t', b':'];
        delimiters_to_try.unique();

        let mut iterator = delimiters_to_try.iter().peekable();

        while let Some(&delimiter) = iterator.next() {
            let is_last_element = iterator.peek().is_none();

            match self.attempt_read_csv(path, delimiter).await {
                // A single column usually means the delimiter was wrong.
                Ok(df) if df.width() <= 1 && !is_last_element => {
                    tracing::warn!(
                        "CSV read with delimiter '{}' resulted in {} columns. Trying next delimiter.",
                        delimiter as char,
                        df.width()
                    );
                }
                Ok(df) => {
                    tracing::info!(
                        "Successfully read CSV with delimiter: '{}'",
                        delimiter as char
                    );
                    return Ok(df);
                }
                Err(e) => {
                    tracing::warn!(
                        "CSV read failed with delimiter '{}': {}",
                        delimiter as char,
                        e
                    );
                }
            }
        }

        let msg = format!(
            "Failed to read CSV '{}' with common delimiters. Check format or specify delimiter.",
            path.display()
        );
        let error = DashboardError::CsvParsing(msg);
        tracing::error!("{}", error);
        Err(error)
    }

    /// Retrieves the CSV separator byte from the `csv_delimiter` String configuration.
    fn get_csv_separator(&self) -> DashboardResult<u8> {
        self.csv_delimiter
            .as_bytes()
            .first()
            .copied()
            .ok_or_else(|| DashboardError::InvalidDelimiter(self.csv_delimiter.clone()))
    }

    async fn attempt_read_csv(&self, path: &Path, delimiter: u8) -> DashboardResult<DataFrame> {
        tracing::debug!(
            "Attempting CSV read with delimiter: '{}'",
            delimiter as char,
        );

        let null_values: Vec<PlSmallStr> = self
            .parse_null_values()
            .into_iter()
            .map(PlSmallStr::from)
            .collect();

        let plpath = PlRefPath::try_from_path(path)?;

        let lazyframe = LazyCsvReader::new(plpath)
            .with_low_memory(false)
            .with_encoding(CsvEncoding::LossyUtf8) // Gracefully handle potential encoding errors.
            .with_has_header(true)
            .with_separator(delimiter)
            .with_infer_schema_length(Some(self.infer_schema_rows))
            .with_ignore_errors(true) // Unparseable fields become nulls instead of stopping.
            .with_missing_is_null(true)
            .with_null_values(Some(NullValues::AllColumns(null_values)))
            .with_rechunk(true)
            .finish()?;

        execute_polars_blocking(move || lazyframe.collect()).await
    }

    /// Parses the comma-separated `null_values` string, removing surrounding double quotes.
    ///
    /// Example Input: `"\"\", --, N/A "`
    /// Example Output: `vec!["", "--", "N/A"]`
    pub fn parse_null_values(&self) -> Vec<&str> {
        self.null_values
            .split(',')
            .map(|s| {
                let trimmed = s.trim();
                if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
                    trimmed[1..trimmed.len() - 1].trim()
                } else {
                    trimmed
                }
            })
            .collect()
    }
}

/// Executes a potentially blocking Polars operation on a separate Tokio blocking thread.
///
/// Maps both the `JoinError` and the inner `PolarsError` to `DashboardError`.
async fn execute_polars_blocking<T, F>(op: F) -> DashboardResult<T>
where
    F: FnOnce() -> Result<T, PolarsError> + Send + 'static,
    T: Debug + Send + 'static,
{
    let polars_result = spawn_blocking(op).await?;
    Ok(polars_result?)
}

//----------------------------------------------------------------------------//
//                                   Tests                                    //
//----------------------------------------------------------------------------//
