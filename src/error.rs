use std::path::PathBuf;

use thiserror::Error;

use crate::backend::Backend;

/// Boxed error raised by one of the storage libraries.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while loading or sampling a trace database.
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Backend {0} is not supported.")]
    UnsupportedBackend(String),
    #[error("Backend {0} was not compiled in. Rebuild with the `{0}` feature enabled.")]
    BackendDisabled(Backend),
    #[error("Failed to load trace database {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: BoxedSource,
    },
    #[error("Failed to read trace '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: BoxedSource,
    },
    #[error("No trace named '{0}' in database")]
    UnknownTrace(String),
    #[error("Requested {requested} samples but only {available} are available. The request must be smaller than the number of draws.")]
    InsufficientSamples { requested: usize, available: usize },
    #[error("Got {names} parameter names for a sample array with {columns} columns")]
    ShapeMismatch { names: usize, columns: usize },
    #[error("Trace '{name}' has {found} draws, expected {expected}")]
    RaggedChains {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl TraceError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: impl Into<BoxedSource>) -> Self {
        TraceError::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn read(name: &str, source: impl Into<BoxedSource>) -> Self {
        TraceError::Read {
            name: name.to_string(),
            source: source.into(),
        }
    }
}

/// Convenience type for `Result<T, TraceError>`.
pub type Result<T> = std::result::Result<T, TraceError>;
