use crate::models::ErrorBody;
use axum::{http::StatusCode, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("no contribution data found for user '{0}'")]
    NotFound(String),
    #[error("server misconfigured: {0}")]
    Misconfigured(&'static str),
    #[error("upstream request failed with status {status}")]
    Upstream { status: StatusCode },
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned an unexpected payload: {0}")]
    MalformedPayload(String),
}

impl AggregateError {
    pub fn status(&self) -> StatusCode {
        match self {
            AggregateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AggregateError::NotFound(_) => StatusCode::NOT_FOUND,
            AggregateError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AggregateError::Upstream { status } => *status,
            AggregateError::Transport(_) | AggregateError::MalformedPayload(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
