//! Mapping from domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use onvest_core::error::OnvestError;
use serde::Serialize;
use tracing::error;

/// Body of every failing response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper turning an [`OnvestError`] into an HTTP response.
///
/// Validation, auth, conflict, and not-found errors carry their message
/// to the client; everything else is logged and masked as a plain 500.
#[derive(Debug)]
pub struct ApiError(pub OnvestError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<OnvestError> for ApiError {
    fn from(e: OnvestError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            OnvestError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
            OnvestError::AuthenticationFailed { reason } => {
                (StatusCode::UNAUTHORIZED, reason.clone())
            }
            OnvestError::AuthorizationDenied { reason } => (StatusCode::FORBIDDEN, reason.clone()),
            OnvestError::AlreadyExists { entity } => {
                (StatusCode::CONFLICT, format!("{entity} already exists"))
            }
            OnvestError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            e => {
                error!(error = %e, "request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
