//! Custom error types specific to access control.
//!
//! This module maps gate outcomes that stop a request onto structured
//! errors, providing clear error responses without leaking anything about
//! the resource being protected.

use axum::http::StatusCode;
use thiserror::Error;

use volunhub_adapters::models::Role;

/// Why a request was not allowed through the gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication has not resolved yet; the caller should retry.
    #[error("authentication is still resolving")]
    Unresolved,

    /// No identity where one is required.
    #[error("authentication required")]
    Unauthenticated,

    /// Identity present, but its role does not meet the requirement.
    #[error("role '{held}' may not access this resource (requires '{required}')")]
    Forbidden { required: Role, held: Role },
}

impl AuthError {
    /// HTTP status this gate outcome maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unresolved => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }
}
