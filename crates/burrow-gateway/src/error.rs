use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use burrow_core::ShortenerError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("field '{0}' is required")]
    MissingField(&'static str),
    #[error("stored url cannot be used as a redirect target")]
    InvalidLocation,
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::MissingField(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidLocation => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                ShortenerError::InvalidShortCode(_) | ShortenerError::NotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ShortenerError::CodeSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                ShortenerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
