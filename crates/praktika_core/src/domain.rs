//! crates/praktika_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, Utc};
use std::fmt;

/// The four principal kinds the marketplace knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Student,
    Organization,
    University,
    Admin,
}

impl Role {
    /// Parses the lowercase wire form of a role.
    ///
    /// Unrecognised strings yield `None`; callers treat that the same as
    /// being unauthenticated rather than as an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(Self::Student),
            "organization" => Some(Self::Organization),
            "university" => Some(Self::University),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Organization => "organization",
            Self::University => "university",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated principal.
///
/// `organization_id` is present iff the role is [`Role::Organization`];
/// `university_id` iff the role is [`Role::University`].
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub organization_id: Option<i64>,
    pub university_id: Option<i64>,
}

/// A unit of user-facing event information.
///
/// `is_read` only ever transitions false to true.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// A single allowed destination for the current identity.
///
/// Derived from the role and the active route; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationItem {
    pub label: &'static str,
    pub route: &'static str,
    pub is_current: bool,
}

/// Listing/detail context for the internship pages that host the
/// application workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Internship {
    pub id: i64,
    pub title: String,
    pub organization_name: String,
    pub location: String,
    pub spots_available: i64,
}

/// A typed form value ready for submission.
///
/// Numeric and list fields are converted from their entered string form
/// before the payload leaves the workflow; everything else passes through
/// as opaque text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    List(Vec<String>),
}

/// The single API write produced by a completed submission workflow.
///
/// Field order is preserved from the form definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionPayload {
    pub fields: Vec<(String, FieldValue)>,
}

impl SubmissionPayload {
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}
