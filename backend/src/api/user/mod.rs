//! Module for user directory management API endpoints.
//!
//! Endpoints here are reserved for super-admins: listing every registered
//! user and toggling a user between the volunteer and event-admin roles.

pub mod handlers;
pub mod routes;
