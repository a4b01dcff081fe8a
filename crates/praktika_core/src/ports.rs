//! crates/praktika_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete HTTP transport.

use async_trait::async_trait;

use crate::domain::{Identity, Internship, Notification, SubmissionPayload};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Any non-2xx response is a failure regardless of body shape; the adapter
/// carries the body text verbatim when one is available.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The server rejected the request; the payload is the response body text.
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a response (DNS, refused, timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// The response arrived but could not be understood.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    /// The text shown to the user for this failure.
    ///
    /// Server-provided messages are surfaced verbatim; transport and decode
    /// failures collapse to a generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Rejected(msg) => msg.clone(),
            Self::Network(_) => "Connection error. Please try again.".to_string(),
            Self::Unexpected(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Marketplace API Port
//=========================================================================================

/// The remote marketplace API, as seen by the core.
///
/// Everything the application persists or reads goes through this boundary,
/// so tests can substitute an in-memory double.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    // --- Authentication ---
    async fn login(&self, email: &str, password: &str) -> PortResult<Identity>;

    async fn register(&self, payload: &SubmissionPayload) -> PortResult<Identity>;

    // --- Notifications ---
    async fn notifications(&self, user_id: i64) -> PortResult<Vec<Notification>>;

    async fn mark_notification_read(&self, id: i64) -> PortResult<()>;

    async fn mark_all_notifications_read(&self, user_id: i64) -> PortResult<()>;

    // --- Internships ---
    async fn internships(&self) -> PortResult<Vec<Internship>>;

    async fn internship(&self, id: i64) -> PortResult<Internship>;

    async fn post_internship(&self, payload: &SubmissionPayload) -> PortResult<()>;

    // --- Applications ---
    async fn submit_application(&self, payload: &SubmissionPayload) -> PortResult<()>;
}
