use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ports::{PlatformError, RepositoryError};

#[derive(Error, Debug)]
pub enum AppError {
    /// A raw value could not be mapped onto a domain value.
    #[error("{message}")]
    InvalidParam { message: String, value: String },

    /// An aggregate refused an operation. `code` mirrors HTTP semantics.
    #[error("{message}")]
    Domain { message: String, code: u16 },

    #[error("{0}")]
    UnprocessableWebhook(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    pub fn invalid_param(message: impl Into<String>, value: impl Into<String>) -> Self {
        AppError::InvalidParam {
            message: message.into(),
            value: value.into(),
        }
    }

    pub fn domain(message: impl Into<String>, code: u16) -> Self {
        AppError::Domain {
            message: message.into(),
            code,
        }
    }

    /// Numeric code carried by the error, as reported to webhook callers.
    pub fn code(&self) -> u16 {
        match self {
            AppError::InvalidParam { .. } | AppError::BadRequest(_) => 400,
            AppError::Domain { code, .. } => *code,
            AppError::UnprocessableWebhook(_) => 500,
            AppError::NotFound(_) => 404,
            AppError::Unauthorized(_) => 401,
            AppError::Repository(_) | AppError::Platform(_) | AppError::Internal(_) => 500,
        }
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        } else {
            tracing::warn!(status = status.as_u16(), "{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
