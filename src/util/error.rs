//! Error types for molecule list processing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for molecule list operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input or output file could not be opened
    #[error("Could not open localization file {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is shorter than the fixed header block
    #[error("Header truncated: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// Fewer bytes than one full record at the given position
    #[error("Record {index} truncated at byte offset {offset}")]
    TruncatedRecord { index: u32, offset: u64 },

    /// Output write failed or was short
    #[error("Write failed")]
    Write(#[source] std::io::Error),

    /// Link chain points outside the list or loops back on itself
    #[error("Corrupt track starting at record {head}: record {index} {reason}")]
    CorruptChain { head: u32, index: u32, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a file open error for the given path.
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen { path: path.into(), source }
    }

    /// Create a corrupt chain error.
    pub fn corrupt(head: u32, index: u32, reason: impl Into<String>) -> Self {
        Self::CorruptChain { head, index, reason: reason.into() }
    }
}

/// Result type alias for molecule list operations.
pub type Result<T> = std::result::Result<T, Error>;
