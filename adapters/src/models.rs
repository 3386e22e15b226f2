//! Generic data models for the `adapters` crate.
//!
//! These models define common, abstracted representations of directory
//! entities (roles, identities, user records, event RSVPs) that can be used
//! by any adapter implementation, allowing the backend services to interact
//! with a consistent data format.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role attached to a directory record or an authenticated caller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Volunteer,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Wire name of the role, as stored in the document database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Volunteer => "volunteer",
            Role::Admin => "admin",
            Role::SuperAdmin => "super-admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles that may be assigned through the directory. The protected
/// `super-admin` role is deliberately unrepresentable here.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AssignableRole {
    Volunteer,
    Admin,
}

impl From<AssignableRole> for Role {
    fn from(role: AssignableRole) -> Self {
        match role {
            AssignableRole::Volunteer => Role::Volunteer,
            AssignableRole::Admin => Role::Admin,
        }
    }
}

/// Authenticated caller as reported by the identity provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Resolution state of the caller's identity for one session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AuthState {
    /// The provider has not finished resolving the session yet.
    Resolving,
    /// Resolved: no identity is attached to the session.
    Anonymous,
    /// Resolved: the session belongs to this identity.
    Authenticated(Identity),
}

impl AuthState {
    /// The resolved identity, if the session has one.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Directory record for a registered user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A volunteer's confirmed attendance for one event, as the dashboard
/// renders it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    /// Identifier of the event the RSVP belongs to.
    pub id: String,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub location: String,
    pub rsvp_date: NaiveDate,
}

/// One hosted event with its attendance list, in document-database shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EventDoc {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rsvps: Vec<RsvpEntry>,
}

/// Attendance entry inside an event document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RsvpEntry {
    pub user_id: String,
    pub rsvp_date: NaiveDate,
}

/// Top-level store document: the two collections the service reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub events: Vec<EventDoc>,
}
