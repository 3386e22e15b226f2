//! Handler functions for authentication-related API endpoints.
//!
//! These functions expose the caller's resolution state so a front-end can
//! poll until authentication resolves instead of flashing a denial.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use volunhub_adapters::models::AuthState;

use crate::AppState;

use super::middleware::bearer_token;

/// `GET /api/auth/session`: the caller's current resolution state.
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> Json<AuthState> {
    Json(state.identity.resolve(bearer_token(&headers)).await)
}
