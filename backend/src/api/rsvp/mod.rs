//! Module for the volunteer dashboard API.
//!
//! This module exposes the caller's event RSVPs, the data behind the
//! "My Events" view. Any authenticated caller may read their own feed.

pub mod handlers;
pub mod routes;
