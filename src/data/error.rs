use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – the only failure a model can report
// ---------------------------------------------------------------------------

/// A file could not be turned into a [`Dataset`](super::model::Dataset).
///
/// Carries the offending path and the reason. The reason is exposed as the
/// error's `source()`, so `{e:#}` through `anyhow` prints both.
#[derive(Error, Debug)]
#[error("failed to load '{}'", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub cause: LoadCause,
}

impl LoadError {
    pub fn new(path: impl Into<PathBuf>, cause: LoadCause) -> Self {
        Self {
            path: path.into(),
            cause,
        }
    }

    /// Classify an I/O failure on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let cause = match err.kind() {
            io::ErrorKind::NotFound => LoadCause::NotFound,
            _ => LoadCause::Unreadable(err),
        };
        Self::new(path, cause)
    }

    /// True when the file was missing or could not be read, as opposed to
    /// being read but failing to parse.
    pub fn is_io(&self) -> bool {
        matches!(self.cause, LoadCause::NotFound | LoadCause::Unreadable(_))
    }
}

/// Why a load failed. Line numbers are 1-based positions in the file.
#[derive(Error, Debug)]
pub enum LoadCause {
    #[error("file not found")]
    NotFound,

    #[error("file unreadable: {0}")]
    Unreadable(#[source] io::Error),

    #[error("line {line}, column {column}: '{token}' is not a number")]
    NonNumeric {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line}: expected {expected} columns but found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("no data rows")]
    Empty,

    #[error("malformed delimited input at line {line}: {message}")]
    Csv { line: usize, message: String },
}
