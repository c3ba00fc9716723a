use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::registry::RegistryError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Body shape for 401 and 500 responses.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Body shape for 400/404/409: describes the violated precondition.
#[derive(Serialize)]
struct MessageBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, Json(MessageBody { message: msg })).into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, Json(MessageBody { message: msg })).into_response()
            }
            ApiError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (StatusCode::CONFLICT, Json(MessageBody { message: msg })).into_response()
            }
            ApiError::InternalError(msg) => {
                // The detail is logged; the caller only ever sees the generic body.
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal server error.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UserNotFound(id) => {
                ApiError::NotFound(format!("User not found: {}", id))
            }
            RegistryError::EmailAlreadyExists(email) => {
                ApiError::Conflict(format!("Email already in use: {}", email))
            }
            RegistryError::ValidationError(msg) => ApiError::BadRequest(msg),
        }
    }
}

/// Panic handler for the outermost error boundary layer.
///
/// Must never panic itself: it only logs the payload and builds a fixed
/// generic response.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };

    tracing::error!("Unhandled panic while serving request: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: "Internal server error.".to_string(),
        }),
    )
        .into_response()
}
