use crate::range::InvalidRangeError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

/// Import failure taxonomy. Every variant aborts the import before any
/// state change: parsing, mapping, and per-row validation all complete
/// before the caller commits the result.
#[derive(Debug)]
pub enum ImportError {
    Csv(csv::Error),
    Json(SerdeJsonError),
    Io(io::Error),
    /// Required logical fields left without a source column.
    MappingIncomplete(Vec<&'static str>),
    /// A mapped source column does not exist in the parsed table.
    MissingColumn(String),
    InvalidDate {
        field: &'static str,
        value: String,
    },
    InvalidRange(InvalidRangeError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Csv(err) => write!(f, "csv parse error: {err}"),
            ImportError::Json(err) => write!(f, "json parse error: {err}"),
            ImportError::Io(err) => write!(f, "io error: {err}"),
            ImportError::MappingIncomplete(fields) => {
                write!(f, "column mapping incomplete: {}", fields.join(", "))
            }
            ImportError::MissingColumn(column) => {
                write!(f, "mapped column not present in input: {column}")
            }
            ImportError::InvalidDate { field, value } => {
                write!(f, "invalid date in column {field}: '{value}'")
            }
            ImportError::InvalidRange(err) => write!(f, "invalid date range: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SerdeJsonError> for ImportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for ImportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<InvalidRangeError> for ImportError {
    fn from(value: InvalidRangeError) -> Self {
        Self::InvalidRange(value)
    }
}

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Json(SerdeJsonError),
    Io(io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(err) => write!(f, "csv serialization error: {err}"),
            ExportError::Json(err) => write!(f, "json serialization error: {err}"),
            ExportError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<SerdeJsonError> for ExportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub mod export;
pub mod import;

pub use export::{ExportRow, export_flat, to_csv_bytes, to_json_bytes};
pub use import::{
    ColumnMapping, ImportFormat, ImportResult, RawTable, REQUIRED_FIELDS, load_seed_data,
    load_seed_file, parse, parse_csv, parse_json, transform_import,
};
