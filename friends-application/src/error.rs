use friends_domain::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("no {0} returned")]
    UpstreamEmpty(&'static str),
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Plain-text chat reply describing the failure.
    pub fn reply_text(&self) -> String {
        match self {
            AppError::UpstreamUnavailable(detail) => format!("Could not reach Untappd: {}", detail),
            AppError::UpstreamEmpty(what) => format!("No {} from your friends.", what),
            AppError::UserNotFound(username) => {
                format!("Could not find an Untappd user named '{}'.", username)
            }
            AppError::MalformedPayload(detail) => {
                format!("Untappd returned an unexpected response: {}", detail)
            }
            AppError::Internal(_) => "Something went wrong talking to Untappd.".to_string(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Unavailable(detail) | ApiError::NotFound(detail) => {
                AppError::UpstreamUnavailable(detail)
            }
            ApiError::Malformed(detail) => AppError::MalformedPayload(detail),
        }
    }
}
