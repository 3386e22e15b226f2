//! Module for core business logic services.
//!
//! This module encapsulates services that perform the directory and
//! dashboard operations, orchestrating between the API handlers and the
//! store adapters.

pub mod role_directory;
pub mod rsvp_feed;
