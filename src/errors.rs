use thiserror::Error;

/// Error type for the storage, config, and CLI boundaries.
///
/// The schedule and finance engines themselves never return errors:
/// malformed input fields degrade to safe defaults instead.
#[derive(Debug, Error)]
pub enum CourseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}
