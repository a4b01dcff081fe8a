//! crates/praktika_core/src/session.rs
//!
//! Single source of truth for "who is logged in".
//!
//! Identity changes are broadcast over a watch channel so that dependent
//! components (navigation, guards, the notification feed) observe them
//! without manual wiring.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::domain::{Identity, Role, SubmissionPayload};
use crate::guard::{self, AccessDecision};
use crate::ports::{MarketplaceApi, PortError};

/// A failed login or registration, carrying the user-facing message.
///
/// Credential rejections surface the server's text verbatim; transport
/// failures surface a generic connection message. The two are told apart
/// only by that text, per the API contract.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl From<PortError> for AuthError {
    fn from(err: PortError) -> Self {
        Self {
            message: err.user_message(),
        }
    }
}

/// Holds the authenticated identity for the lifetime of the session.
///
/// Cloning is cheap; all clones share the same identity slot.
#[derive(Clone)]
pub struct SessionStore {
    api: Arc<dyn MarketplaceApi>,
    identity: Arc<watch::Sender<Option<Identity>>>,
}

impl SessionStore {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            api,
            identity: Arc::new(tx),
        }
    }

    /// The currently authenticated identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.identity.borrow().clone()
    }

    /// A receiver that observes every identity change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.identity.subscribe()
    }

    /// Authenticates against the marketplace API.
    ///
    /// On failure the stored identity is left exactly as it was before the
    /// call; it is never cleared by a rejected attempt.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        match self.api.login(email, password).await {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "login succeeded");
                self.identity.send_replace(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                Err(err.into())
            }
        }
    }

    /// Creates an account from a completed registration payload.
    ///
    /// Role-specific required fields are validated again server-side; any
    /// server error text is surfaced verbatim in the returned message.
    pub async fn register(&self, payload: &SubmissionPayload) -> Result<Identity, AuthError> {
        match self.api.register(payload).await {
            Ok(user) => {
                info!(user_id = user.id, role = %user.role, "registration succeeded");
                self.identity.send_replace(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                Err(err.into())
            }
        }
    }

    /// Clears the identity unconditionally.
    ///
    /// Purely local; no network failure can prevent a logout.
    pub fn logout(&self) {
        info!("logout");
        self.identity.send_replace(None);
    }

    /// Decides whether the current identity may see a page restricted to
    /// `allowed` roles. Run this before any data fetch for that page.
    pub fn authorize(&self, allowed: &[Role]) -> AccessDecision {
        guard::check(self.identity.borrow().as_ref(), allowed)
    }

    pub(crate) fn api(&self) -> Arc<dyn MarketplaceApi> {
        Arc::clone(&self.api)
    }
}
