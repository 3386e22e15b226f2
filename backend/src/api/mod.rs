//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the user-directory and
//! RSVP API domains, excluding the session endpoint which is handled by the
//! auth module.

pub mod rsvp;
pub mod user;
