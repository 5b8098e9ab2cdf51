use thiserror::Error;

/// Failure reported by the Untappd API port.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}
