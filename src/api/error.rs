//! Mapping of [`HelpdeskError`] onto HTTP responses

use crate::error::{ErrorKind, HelpdeskError};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error returned from HTTP handlers
///
/// Serialized as `{"detail": <message>, "code": <category>}`.
#[derive(Debug)]
pub struct ApiError(pub HelpdeskError);

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::Integrity => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HelpdeskError> for ApiError {
    fn from(err: HelpdeskError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(HelpdeskError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            tracing::debug!("Request rejected ({}): {}", self.0.kind(), self.0);
        } else {
            tracing::error!("Request failed: {}", self.0);
        }

        let body = json!({
            "detail": self.0.to_string(),
            "code": self.0.kind().code(),
        });
        (status, Json(body)).into_response()
    }
}
