//! Middleware for protecting restricted routes.
//!
//! Each layer resolves the caller's identity, runs it through the access
//! gate, and either lets the request continue (with the identity attached as
//! a request extension) or answers with the mapped status code.

use axum::extract::State;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use volunhub_adapters::models::{AuthState, Role};

use crate::errors::ApiError;
use crate::AppState;

use super::errors::AuthError;
use super::models::{AccessDecision, RoleRequirement};
use super::service::AccessGate;

/// Extract the bearer token from the `Authorization` header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Gate a request against `requirement`, continuing only on `Granted`.
async fn gate<B>(
    state: AppState,
    requirement: RoleRequirement,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let auth_state = state.identity.resolve(bearer_token(request.headers())).await;

    match AccessGate::check(&auth_state, requirement) {
        AccessDecision::Granted => {
            if let AuthState::Authenticated(identity) = auth_state {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        AccessDecision::Pending => ApiError::from(AuthError::Unresolved).into_response(),
        AccessDecision::Denied => {
            let err = match (&auth_state, requirement) {
                (AuthState::Authenticated(identity), RoleRequirement::Role(required)) => {
                    AuthError::Forbidden {
                        required,
                        held: identity.role,
                    }
                }
                _ => AuthError::Unauthenticated,
            };
            ApiError::from(err).into_response()
        }
    }
}

/// Layer for views any authenticated caller may enter.
pub async fn require_authenticated<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    gate(state, RoleRequirement::Authenticated, request, next).await
}

/// Layer for the super-admin console routes.
pub async fn require_super_admin<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    gate(state, RoleRequirement::Role(Role::SuperAdmin), request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_tokens_are_extracted_from_the_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc-123"));
        assert_eq!(bearer_token(&headers), Some("abc-123"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc-123"));
        assert_eq!(bearer_token(&headers), None);
    }
}
