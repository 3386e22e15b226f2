//! Defines the HTTP routes specifically for authentication.
//!
//! These routes expose the session resolution endpoint. They are designed to
//! be nested under `/api/auth` in the main Axum router.

use axum::routing::get;
use axum::Router;

use crate::AppState;

use super::handlers::session;

pub fn auth_router() -> Router<AppState> {
    Router::new().route("/session", get(session))
}
