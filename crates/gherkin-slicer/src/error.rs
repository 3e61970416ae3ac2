//! Error types for slicing feature files.
//!
//! Each stage has its own error so callers can tell a malformed input apart
//! from a document the model cannot represent or an I/O failure while
//! reading inputs or writing outputs.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::document::DocumentError;

/// Errors raised while slicing a single input.
#[derive(Debug, Error)]
pub enum SliceError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The input is not valid Gherkin.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Input path.
        path: Utf8PathBuf,
        /// Error reported by the Gherkin parser.
        #[source]
        source: gherkin::ParseError,
    },

    /// The parsed feature does not fit the document model.
    #[error("unsupported feature structure in {path}: {source}")]
    Structure {
        /// Input path.
        path: Utf8PathBuf,
        /// The structural mismatch.
        #[source]
        source: DocumentError,
    },

    /// An output unit could not be persisted.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Errors raised by file-writing sinks.
#[derive(Debug, Error)]
pub enum WriteError {
    /// An output directory could not be created or opened.
    #[error("failed to prepare output directory {path}: {source}")]
    Directory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    File {
        /// File path, or the directory when no name was claimed yet.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while locating input files or cleaning the output directory.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory could not be walked or a file could not be removed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being processed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A discovered path is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
