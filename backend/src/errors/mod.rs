//! Global application error types and response formatting.
//!
//! Service and adapter faults are mapped onto one `ApiError` so every
//! endpoint answers failures with the same `{"error": ...}` JSON shape and
//! a meaningful status code.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use volunhub_adapters::errors::StoreError;

use crate::auth::errors::AuthError;
use crate::services::role_directory::DirectoryError;

/// Uniform error answered by every endpoint.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        let mut response = (self.status, body).into_response();
        // Pending auth maps to 503: clients poll the session endpoint until
        // it resolves.
        if self.status == StatusCode::SERVICE_UNAVAILABLE {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from_static("1"));
        }
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::new(err.status(), err.to_string())
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let status = match &err {
            DirectoryError::Fetch(_) | DirectoryError::Update(_) => StatusCode::BAD_GATEWAY,
            DirectoryError::ProtectedRole { .. } => StatusCode::FORBIDDEN,
            DirectoryError::UnknownUser { .. } => StatusCode::NOT_FOUND,
            DirectoryError::UpdateInFlight { .. } => StatusCode::CONFLICT,
            DirectoryError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, err.to_string())
    }
}
