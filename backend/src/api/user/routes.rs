//! Defines the HTTP routes for the user directory.
//!
//! These routes map the admin-console paths onto their handlers and attach
//! the super-admin gate to the whole group.

use axum::routing::{get, put};
use axum::{middleware, Router};

use crate::auth::middleware::require_super_admin;
use crate::AppState;

use super::handlers::{list_users, set_user_role};

pub fn user_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", put(set_user_role))
        .route_layer(middleware::from_fn_with_state(state, require_super_admin))
}
