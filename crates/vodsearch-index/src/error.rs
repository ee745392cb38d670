//! Error types for the vodsearch-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while opening and loading a corpus artifact.
///
/// Any of these aborts the load: an engine is never built from a partial corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// No corpus path is set in any configuration file.
    #[error("no corpus configured (set [corpus] path in .vodsearch.toml)")]
    NotConfigured,

    /// Failed to read an artifact file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An artifact file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    ParseJson {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The SQLite artifact could not be opened or queried.
    #[error("sqlite error in {path}: {source}")]
    Sqlite {
        /// Path to the database.
        path: PathBuf,
        /// Underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A JSON-encoded column in the SQLite artifact failed to decode.
    #[error("failed to decode {column} for video {video}: {source}")]
    DecodeColumn {
        /// Video id of the row (or the word, for word-map rows).
        video: String,
        /// Column name.
        column: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// An upload date is not an eight-digit `YYYYMMDD` calendar date.
    #[error("invalid upload date for video {video}: {value}")]
    InvalidUploadDate {
        /// Video id.
        video: String,
        /// The raw value found in the artifact.
        value: String,
    },

    /// A required `info` row is absent from the SQLite artifact.
    #[error("corpus info is missing key '{key}'")]
    MissingInfo {
        /// The missing key.
        key: &'static str,
    },
}

/// Errors raised while preparing a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The escaped phrase could not be compiled into a matcher.
    #[error("cannot search for phrase '{phrase}': {source}")]
    Pattern {
        /// The phrase as given.
        phrase: String,
        /// Underlying regex error (typically a size limit).
        source: regex::Error,
    },
}
