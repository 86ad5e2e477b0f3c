// Port Failure Types

use thiserror::Error;

/// Failure of a single lookup call. Any variant means no partial record.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("API error {code} ({kind}): {info}")]
    Api { code: i64, kind: String, info: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure reported by a feedback implementation.
#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Feedback backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
