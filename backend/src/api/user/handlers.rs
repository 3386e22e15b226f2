//! Handler functions for the user directory API.
//!
//! These functions process admin-console requests, delegate to
//! `services::role_directory` for the directory logic, and format the
//! responses.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use volunhub_adapters::models::{AssignableRole, UserRecord};

use crate::errors::ApiError;
use crate::AppState;

/// Body of the role-update request.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: AssignableRole,
}

/// Directory record as the admin console renders it.
#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub record: UserRecord,
    /// True while a role update for this user is still in flight; the
    /// console disables the role control until it resolves.
    pub updating: bool,
}

/// `GET /api/users`: bulk load of the directory.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserView>>, ApiError> {
    let users = state.directory.list().await?;
    let views = users
        .into_iter()
        .map(|record| {
            let updating = state.directory.is_updating(&record.id);
            UserView { record, updating }
        })
        .collect();
    Ok(Json(views))
}

/// `PUT /api/users/:id/role`: toggle a user between volunteer and admin.
pub async fn set_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> Result<Json<UserRecord>, ApiError> {
    let updated = state.directory.set_role(&user_id, body.role).await?;
    Ok(Json(updated))
}
