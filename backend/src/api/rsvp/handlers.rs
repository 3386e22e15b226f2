//! Handler functions for the volunteer dashboard API.
//!
//! These functions read the caller's RSVPs through `services::rsvp_feed`
//! and format the responses. The identity comes from the request extension
//! the gate middleware inserted.

use axum::extract::State;
use axum::{Extension, Json};

use volunhub_adapters::models::{Identity, Rsvp};

use crate::errors::ApiError;
use crate::AppState;

/// `GET /api/rsvps`: the caller's RSVPs, next event first.
pub async fn my_rsvps(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<Rsvp>>, ApiError> {
    let rsvps = state.rsvps.list_for(&identity.id).await?;
    Ok(Json(rsvps))
}
