//! Data structures for the access-control flow.
//!
//! This module defines the requirement a restricted view places on its
//! caller and the decision the access gate hands back, used between the
//! gate, the middleware, and the presentation layer.

use serde::Serialize;

use volunhub_adapters::models::Role;

pub use volunhub_adapters::models::{AuthState, Identity};

/// What a restricted view demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Any resolved identity is enough (volunteer dashboard).
    Authenticated,
    /// The caller's role must match exactly (super-admin console).
    Role(Role),
}

/// Outcome of gating one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessDecision {
    /// Authentication has not resolved; render a loading state and retry.
    Pending,
    /// Identity present but insufficient, or absent where one is required.
    Denied,
    /// The caller may proceed and the view may request its data.
    Granted,
}
