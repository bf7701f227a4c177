use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::Envelope;

/// Message returned when a registration or update reuses a phone number.
pub const PHONE_TAKEN_MESSAGE: &str = "phone number is already registered to an existing user";

/// Message rendered for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "an internal error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A record the server relies on is gone. Rendered as 500 with the
    /// message, unlike [`ApiError::Internal`].
    #[error("Missing record: {0}")]
    MissingRecord(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::MissingRecord(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Messages shown to the client.
    fn messages(self) -> Vec<String> {
        match self {
            ApiError::Validation(messages) => messages,
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg) => vec![msg],
            ApiError::MissingRecord(msg) => {
                tracing::error!("Missing record: {}", msg);
                vec![msg]
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                vec![INTERNAL_ERROR_MESSAGE.to_string()]
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(Envelope::failure(self.messages()))).into_response()
    }
}
