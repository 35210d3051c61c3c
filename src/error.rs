//! Error types for the validation gate
//!
//! Every fallible public operation returns [`Result`]. The error carries the
//! failure category ([`ErrorKind`]), the underlying cause, and the source
//! location where the failure was wrapped.

use std::panic::Location;
use std::path::Path;

use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Boxed cause attached to load and write failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure category
#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load dataset '{path}': {source}")]
    DatasetLoad {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Data error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Wrapped error returned by every public operation
#[derive(Error, Debug)]
#[error("Error occurred in script: {file} at line number: {line} with message: {kind}")]
pub struct ValidationError {
    #[source]
    kind: ErrorKind,
    file: &'static str,
    line: u32,
}

impl ValidationError {
    /// Wrap a failure, recording the caller's location
    #[track_caller]
    pub fn new(kind: ErrorKind) -> Self {
        let location = Location::caller();
        Self {
            kind,
            file: location.file(),
            line: location.line(),
        }
    }

    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration(message.into()))
    }

    #[track_caller]
    pub fn computation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Computation(message.into()))
    }

    #[track_caller]
    pub fn dataset_load(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::DatasetLoad {
            path: path.display().to_string(),
            source: source.into(),
        })
    }

    #[track_caller]
    pub fn write(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::new(ErrorKind::Write {
            path: path.display().to_string(),
            source: source.into(),
        })
    }

    /// Failure category
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Source file where the failure was wrapped
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line where the failure was wrapped
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl From<ErrorKind> for ValidationError {
    #[track_caller]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<std::io::Error> for ValidationError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

impl From<serde_yaml::Error> for ValidationError {
    #[track_caller]
    fn from(err: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::Yaml(err))
    }
}

impl From<polars::error::PolarsError> for ValidationError {
    #[track_caller]
    fn from(err: polars::error::PolarsError) -> Self {
        Self::new(ErrorKind::Polars(err))
    }
}
