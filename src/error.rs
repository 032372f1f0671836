//! Error types for matrix building and cluster extraction.

use std::fmt;
use std::path::{Path, PathBuf};

/// Result type for snpclust operations.
pub type ClusterResult<T> = Result<T, ClusterError>;

/// Errors that abort a clustering run.
///
/// An empty clustering is not an error; it is an empty [`crate::ExtractionResult`]
/// assignment list.
#[derive(Debug, Clone)]
pub enum ClusterError {
    /// Required columns are absent, or a value cannot be parsed as the
    /// expected numeric type.
    MalformedInput { context: String, reason: String },

    /// An argument outside its accepted domain (linkage method, threshold).
    InvalidArgument { arg: String, reason: String },

    /// Reading or writing a file failed.
    Io { path: PathBuf, message: String },

    /// Failure reported by the tensor runtime.
    Numeric { message: String },
}

impl ClusterError {
    pub(crate) fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &Path, err: impl fmt::Display) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Failure while producing output that has no file path of its own.
    pub(crate) fn output(context: &str, err: impl fmt::Display) -> Self {
        Self::Io {
            path: PathBuf::from(context),
            message: err.to_string(),
        }
    }

    /// Map a csv error: I/O failures stay I/O, everything else is malformed input.
    pub(crate) fn csv(context: &str, path: Option<&Path>, err: csv::Error) -> Self {
        match path {
            Some(path) if err.is_io_error() => Self::io(path, err),
            _ => Self::malformed(context, err.to_string()),
        }
    }
}

impl fmt::Display for ClusterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedInput { context, reason } => {
                write!(f, "Malformed input in {}: {}", context, reason)
            }
            Self::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument '{}': {}", arg, reason)
            }
            Self::Io { path, message } => {
                write!(f, "I/O error on {}: {}", path.display(), message)
            }
            Self::Numeric { message } => {
                write!(f, "Numerical error: {}", message)
            }
        }
    }
}

impl std::error::Error for ClusterError {}

impl From<numr::error::Error> for ClusterError {
    fn from(err: numr::error::Error) -> Self {
        match err {
            numr::error::Error::InvalidArgument { arg, reason } => Self::InvalidArgument {
                arg: arg.to_string(),
                reason,
            },
            other => Self::Numeric {
                message: other.to_string(),
            },
        }
    }
}
