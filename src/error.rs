//! Error types for recording output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while finalizing a session or persisting its artifact.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to print frame listing: {0}")]
    Listing(#[source] io::Error),

    #[error("Failed to encode artifact: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to decode compact frames: {0}")]
    Compact(#[from] CompactError),

    #[error("Column `{column}` has {actual} entries, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl PlaybackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors decoding a compact frame record.
#[derive(Debug, Error, PartialEq)]
pub enum CompactError {
    #[error("Compact record is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("Unknown frame type code: {0:?}")]
    UnknownCode(String),

    #[error("Invalid line number: {0:?}")]
    InvalidLine(String),

    #[error("Invalid time value: {0:?}")]
    InvalidTime(String),

    #[error("Invalid locals encoding: {0}")]
    InvalidLocals(String),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
