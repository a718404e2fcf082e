use reqwest::StatusCode;
use thiserror::Error as ThisError;

/// Message shown when the service rejects a prediction without saying why.
pub const PREDICTION_FAILED: &str = "Prediction failed";

/// Errors returned by [`ApiClient`](super::ApiClient).
#[derive(ThisError, Debug)]
pub enum ApiError {
    /// The service could not be reached, or the connection broke mid-response.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Service { status: StatusCode, message: String },

    /// The service answered 2xx with a body we cannot use.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Service { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::InvalidResponse(_) => None,
        }
    }
}
