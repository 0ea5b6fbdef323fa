//! Error types for track parsing.

use std::path::PathBuf;
use tc_common::TimeParseError;
use thiserror::Error;

/// Errors that abort a whole parse.
#[derive(Error, Debug)]
pub enum AtcfError {
    #[error("Track file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unrecognized track format: {0}")]
    UnrecognizedFormat(String),

    #[error(transparent)]
    MalformedTimestamp(#[from] TimeParseError),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid storm id '{0}': expected a two-digit number and basin letter, e.g. 09L")]
    InvalidStormId(String),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with a single record. These are logged and the record skipped.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("invalid {field} value '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Timestamp(#[from] TimeParseError),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, AtcfError>;
