//! Error taxonomy shared by the generator and the analyzer.
//!
//! Every error terminates the run; nothing is recovered silently. Variants
//! carry the offending path so the failure can be traced to one file.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type BenchResult<T> = Result<T, BenchError>;

/// Errors surfaced by the benchmark tools
#[derive(Debug)]
pub enum BenchError {
    /// Invalid domain parameters, rejected before any particle is emitted
    Configuration(String),
    /// A tabular file is missing an expected column or holds a malformed field
    Schema {
        path: PathBuf,
        line: usize,
        message: String,
    },
    /// A snapshot holds no fluid particle, so the leading edge is undefined
    EmptySelection { path: PathBuf },
    /// A single snapshot extraction failed and aborted the whole series
    Aggregation { source: Box<BenchError> },
    /// Reading or writing a file failed
    Io { path: PathBuf, source: io::Error },
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BenchError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(
        path: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        BenchError::Schema {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            BenchError::Schema {
                path,
                line,
                message,
            } => write!(f, "{}:{line}: {message}", path.display()),
            BenchError::EmptySelection { path } => write!(
                f,
                "{}: no fluid particle in snapshot, leading edge is undefined",
                path.display()
            ),
            BenchError::Aggregation { source } => {
                write!(f, "time-series aggregation aborted: {source}")
            }
            BenchError::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Io { source, .. } => Some(source),
            BenchError::Aggregation { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}
