//! Error types for the user service and its HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use user_api_common::{MessageResponse, ValidationErrorResponse};

use crate::store::StoreError;
use crate::validation::FieldErrors;

/// Message returned when a lookup by id misses.
pub const USER_NOT_FOUND: &str = "There is no user corresponding to this id";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub fn user_not_found() -> Self {
        Error::NotFound(USER_NOT_FOUND.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(message))).into_response()
            }
            Error::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse::new(errors.into_inner())),
            )
                .into_response(),
            Error::Store(e) => {
                tracing::error!("User store failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
