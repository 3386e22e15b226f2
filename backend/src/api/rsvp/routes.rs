//! Defines the HTTP routes for the volunteer dashboard.
//!
//! These routes map the dashboard paths onto their handlers and attach the
//! authenticated-caller gate to the whole group.

use axum::routing::get;
use axum::{middleware, Router};

use crate::auth::middleware::require_authenticated;
use crate::AppState;

use super::handlers::my_rsvps;

pub fn rsvp_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(my_rsvps))
        .route_layer(middleware::from_fn_with_state(state, require_authenticated))
}
