//! Core access decisions for restricted views.
//!
//! The gate consumes the caller's resolution state once per page load and
//! decides whether the view may proceed, must wait, or must redirect. It has
//! no side effects; navigation and notification stay with the presentation
//! layer.

use volunhub_adapters::models::AuthState;

use super::models::{AccessDecision, RoleRequirement};

/// Authorization gate for restricted views.
pub struct AccessGate;

impl AccessGate {
    /// Decide whether a caller in `state` may enter a view that demands
    /// `requirement`.
    ///
    /// An unresolved state always yields [`AccessDecision::Pending`], never a
    /// denial, so a view cannot flash "access denied" while the provider is
    /// still resolving. Role comparison is exact-match; for
    /// [`RoleRequirement::Authenticated`] any resolved identity suffices.
    pub fn check(state: &AuthState, requirement: RoleRequirement) -> AccessDecision {
        match (state, requirement) {
            (AuthState::Resolving, _) => AccessDecision::Pending,
            (AuthState::Anonymous, _) => AccessDecision::Denied,
            (AuthState::Authenticated(_), RoleRequirement::Authenticated) => {
                AccessDecision::Granted
            }
            (AuthState::Authenticated(identity), RoleRequirement::Role(required)) => {
                if identity.role == required {
                    AccessDecision::Granted
                } else {
                    AccessDecision::Denied
                }
            }
        }
    }
}
