use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use crate::{management::StoreError, spotify::SpotifyError};

/// Failures answered by the proxy, each mapped onto a status and an
/// `{error}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A credential or field is missing; raised before any network call.
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// The token does not belong to the user the request is about.
    #[error("{0}")]
    Forbidden(&'static str),

    /// Spotify refused the call; its status and body are passed on as-is.
    #[error("Spotify answered {status}")]
    Upstream { status: StatusCode, body: Value },

    /// The code exchange failed, reported as 500 with Spotify's body.
    #[error("token exchange failed: {0}")]
    Exchange(Value),

    #[error("{0}")]
    Internal(String),
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            SpotifyError::Status { status, body } => ApiError::Upstream { status, body },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, json!(msg)),
            ApiError::Unauthorized(msg) => error_body(StatusCode::UNAUTHORIZED, json!(msg)),
            ApiError::Forbidden(msg) => error_body(StatusCode::FORBIDDEN, json!(msg)),
            ApiError::Upstream { status, body } => (status, Json(body)).into_response(),
            ApiError::Exchange(body) => error_body(StatusCode::INTERNAL_SERVER_ERROR, body),
            ApiError::Internal(msg) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, Value::String(msg))
            }
        }
    }
}

fn error_body(status: StatusCode, error: Value) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}
