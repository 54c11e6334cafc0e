use crate::PathExtension;
use std::{fmt, path::Path};

/// Tabular formats the source adapter can read, detected from the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileExtension {
    /// Comma (or other delimiter) separated values.
    Csv,
    Json,
    /// Newline-Delimited Json, also accepted as `.jsonl`.
    NDJson,
    Parquet,
    /// Spreadsheet workbook; the first sheet is read.
    Excel,
    /// Any other extension, kept for the error message.
    Unknown(String),
    /// The path has no extension.
    Missing,
}

impl FileExtension {
    /// Determines the file extension from a given path.
    pub fn from_path(path: &Path) -> Self {
        match path.extension_as_lowercase().as_deref() {
            Some("csv") => FileExtension::Csv,
            Some("json") => FileExtension::Json,
            Some("ndjson" | "jsonl") => FileExtension::NDJson,
            Some("parquet") => FileExtension::Parquet,
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => FileExtension::Excel,
            Some(ext) => FileExtension::Unknown(ext.to_owned()),
            None => FileExtension::Missing,
        }
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileExtension::Csv => f.write_str("CSV"),
            FileExtension::Json => f.write_str("JSON"),
            FileExtension::NDJson => f.write_str("NDJSON"),
            FileExtension::Parquet => f.write_str("Parquet"),
            FileExtension::Excel => f.write_str("Excel"),
            FileExtension::Unknown(ext) => write!(f, "unsupported (.{ext})"),
            FileExtension::Missing => f.write_str("missing"),
        }
    }
}
