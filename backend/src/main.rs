//! Main entry point for the VolunHub backend.
//!
//! This file initializes the Axum web server, wires the store and identity
//! adapters into the application state, and registers all API routes and
//! middleware. It orchestrates the application's startup and defines its
//! overall structure.

mod api;
mod auth;
mod config;
mod errors;
mod middleware;
mod services;

use std::sync::Arc;

use axum::routing::get;
use axum::{middleware as layers, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use volunhub_adapters::jsonfile::JsonStore;
use volunhub_adapters::memory::{MemoryIdentityProvider, MemoryStore};
use volunhub_adapters::models::{Identity, Role, StoreDocument};
use volunhub_adapters::{DirectoryStore, EventStore, IdentityProvider};

use crate::config::Config;
use crate::services::role_directory::RoleDirectory;
use crate::services::rsvp_feed::RsvpFeed;

/// Demo collections served when no store document is configured.
const DEMO_SEED: &str = include_str!("../seed.json");

/// Shared handles every handler and gate layer works against.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub directory: Arc<RoleDirectory>,
    pub rsvps: Arc<RsvpFeed>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("configuration");
    let state = build_state(&config);

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .nest("/api/users", api::user::routes::user_router(state.clone()))
        .nest("/api/rsvps", api::rsvp::routes::rsvp_router(state.clone()))
        .layer(layers::from_fn(middleware::log_requests))
        .with_state(state);

    info!("listening on {}", config.listen_addr);

    axum::Server::bind(&config.listen_addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn root_handler() -> &'static str {
    "Welcome to VolunHub!"
}

fn build_state(config: &Config) -> AppState {
    let (directory_store, event_store): (Arc<dyn DirectoryStore>, Arc<dyn EventStore>) =
        match &config.store_path {
            Some(path) => {
                info!(path = %path.display(), "using JSON store document");
                let store = Arc::new(JsonStore::new(path.clone()));
                (store.clone(), store)
            }
            None => {
                info!("no store configured, serving the in-memory demo document");
                let seed: StoreDocument =
                    serde_json::from_str(DEMO_SEED).expect("embedded demo seed is valid");
                let store = Arc::new(MemoryStore::from_document(seed));
                (store.clone(), store)
            }
        };

    let identity = Arc::new(MemoryIdentityProvider::new());
    seed_demo_sessions(&identity);

    AppState {
        identity,
        directory: Arc::new(RoleDirectory::new(directory_store)),
        rsvps: Arc::new(RsvpFeed::new(event_store)),
    }
}

/// Development stand-in for the hosted auth provider: two fixed sessions,
/// marked ready immediately.
fn seed_demo_sessions(identity: &MemoryIdentityProvider) {
    identity.insert_session(
        "super-admin-token",
        Identity {
            id: "super-admin-123".into(),
            email: "superadmin@example.com".into(),
            role: Role::SuperAdmin,
        },
    );
    identity.insert_session(
        "volunteer-token",
        Identity {
            id: "1".into(),
            email: "john@example.com".into(),
            role: Role::Volunteer,
        },
    );
    identity.mark_ready();
}
