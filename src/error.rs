//! Error types for a split run.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are never
//! recovered locally: they propagate to the caller of
//! [`split_file`](crate::split_file), which aborts the run. Parts flushed before
//! the failure stay on disk.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`SplitError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid configuration, detected before the pipeline starts.
    Configuration,
    /// Malformed CSV record in the input.
    Decoding,
    /// Filesystem failure, or failure to encode an output part.
    Io,
    /// A chunking invariant was violated.
    Internal,
}

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("number of lines per file should be higher than 0 (got {0})")]
    InvalidLinesPerFile(i64),

    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("output path has no file name: {}", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error("cannot decode CSV record #{record}: {source}")]
    Decode {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("malformed CSV record #{record} at byte {byte}: {reason}")]
    Malformed {
        record: u64,
        byte: u64,
        reason: &'static str,
    },

    #[error("cannot write CSV part {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{op} {path}: {source}", path = .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to flush a chunk with no data rows")]
    EmptyChunk,
}

impl SplitError {
    /// Build an [`SplitError::Io`] for operation `op` on `path`.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLinesPerFile(_) | Self::InputNotFound(_) | Self::InvalidOutputPath(_) => {
                ErrorKind::Configuration
            }
            Self::Decode { .. } | Self::Malformed { .. } => ErrorKind::Decoding,
            Self::Encode { .. } | Self::Io { .. } => ErrorKind::Io,
            Self::EmptyChunk => ErrorKind::Internal,
        }
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, SplitError>;
