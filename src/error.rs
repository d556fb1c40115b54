//! Unified error handling for report generation.
//!
//! Loading failures carry the offending file and, where it applies, the
//! 1-based line number so the user can find the bad row directly.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failure while reading a benchmark table from disk.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: cannot parse '{token}' as a number", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{}:{line}: expected {expected} columns, found {found}", .path.display())]
    ColumnCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{}: {found} columns, at least {required} required", .path.display())]
    TooFewColumns {
        path: PathBuf,
        found: usize,
        required: usize,
    },

    #[error("{}: no data rows after the header", .path.display())]
    Empty { path: PathBuf },
}

impl DataLoadError {
    /// File the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::ColumnCount { path, .. }
            | Self::TooFewColumns { path, .. }
            | Self::Empty { path } => path,
        }
    }
}

/// Top-level error for a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
