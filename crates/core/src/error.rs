// Central Error Types for the Pool

use thiserror::Error;

/// Construction-time failures of a [`crate::WorkerPool`].
///
/// These are the only errors the pool ever returns to its caller. Job-level
/// failures are reported through the configured logger instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("ipstack: unable to create WorkerPool without config")]
    MissingConfig,

    #[error("ipstack: unable to create WorkerPool without logger in config")]
    MissingLogger,

    #[error("ipstack: unable to create WorkerPool without lookup port")]
    MissingLookup,

    #[error("ipstack: unable to create WorkerPool without feedback port")]
    MissingFeedback,

    #[error("ipstack: invalid WorkerPool config: {0}")]
    InvalidConfig(String),

    #[error("ipstack: WorkerPool must be created inside a Tokio runtime: {0}")]
    NoRuntime(String),
}

/// Failures that terminate a single job without coming from a port.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("job panicked: {0}")]
    Panicked(String),

    #[error("job task cancelled: {0}")]
    Cancelled(String),
}

/// Result type alias using PoolError
pub type Result<T> = std::result::Result<T, PoolError>;
