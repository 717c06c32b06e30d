use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use unlink_core::{CoreError, RegistryError};

pub type Result<T> = std::result::Result<T, AppError>;

/// Transport-level failures.
///
/// Only request-shape problems and store failures land here; the
/// tri-state operation outcomes (not-found, wrong-owner, conflict) are
/// mapped to statuses in the handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid request: {0}")]
    InvalidInput(String),
    #[error("registry error: {0}")]
    Registry(RegistryError),
}

impl From<CoreError> for AppError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortcut(message) => Self::InvalidInput(message),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::InvalidInput(message) => Self::InvalidInput(message),
            other => Self::Registry(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            AppError::Registry(err) => {
                error!(error = %err, "registry request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}
