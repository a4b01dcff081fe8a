//! crates/praktika_core/src/notifications.rs
//!
//! Fetches and caches the current identity's notifications and tracks their
//! read state.
//!
//! Read-state mutations are applied optimistically and rolled back if the
//! API call fails. Display order is whatever the API returned; the feed
//! never re-sorts.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::{Identity, Notification};
use crate::ports::{MarketplaceApi, PortResult};
use crate::session::SessionStore;

/// Outcome of a [`NotificationFeed::refresh`] call.
///
/// A failed fetch is a soft outcome, not an error: the previous cache stays
/// in place and the UI may keep rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// The cache was replaced with `n` fetched notifications.
    Loaded(usize),
    /// Nobody is signed in; the cache was cleared.
    SignedOut,
    /// The fetch was cancelled or its result was no longer relevant;
    /// nothing was committed.
    Cancelled,
    /// The fetch failed; the previous cache is untouched.
    Failed(String),
}

/// The per-view notification cache.
pub struct NotificationFeed {
    api: Arc<dyn MarketplaceApi>,
    session: watch::Receiver<Option<Identity>>,
    items: Vec<Notification>,
    cancel: CancellationToken,
}

impl NotificationFeed {
    pub fn new(session: &SessionStore) -> Self {
        Self {
            api: session.api(),
            session: session.subscribe(),
            items: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Cached notifications, in API return order.
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Exact count of cached unread notifications.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    /// The badge text for the bell icon: `None` when everything is read,
    /// `"9+"` above nine, the exact count otherwise.
    pub fn badge_label(&self) -> Option<String> {
        match self.unread_count() {
            0 => None,
            n if n > 9 => Some("9+".to_string()),
            n => Some(n.to_string()),
        }
    }

    /// A token the hosting view can use to cancel an in-flight refresh.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancels any outstanding fetch and re-arms the feed.
    ///
    /// Called when the hosting view is dismounted; a response that arrives
    /// after this point is discarded without touching the cache.
    pub fn detach(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
    }

    /// Fetches the current identity's notifications and replaces the cache.
    ///
    /// The fetch is scoped to whoever is signed in when the call starts; if
    /// the identity has changed by the time the response arrives, the result
    /// is discarded silently.
    pub async fn refresh(&mut self) -> Refresh {
        let Some(user_id) = self.session.borrow().as_ref().map(|u| u.id) else {
            self.items.clear();
            return Refresh::SignedOut;
        };

        let token = self.cancel.clone();
        let fetched = tokio::select! {
            () = token.cancelled() => return Refresh::Cancelled,
            result = self.api.notifications(user_id) => result,
        };

        // The identity may have changed while the request was in flight.
        if self.session.borrow().as_ref().map(|u| u.id) != Some(user_id) {
            debug!(user_id, "discarding stale notification fetch");
            return Refresh::Cancelled;
        }

        match fetched {
            Ok(items) => {
                debug!(user_id, count = items.len(), "notifications loaded");
                let count = items.len();
                self.items = items;
                Refresh::Loaded(count)
            }
            Err(err) => {
                warn!(user_id, error = %err, "notification fetch failed");
                Refresh::Failed(err.user_message())
            }
        }
    }

    /// Marks one notification as read.
    ///
    /// Idempotent: unknown or already-read ids return `Ok` without an API
    /// call. The local flip happens before the API call and is rolled back
    /// if that call fails.
    pub async fn mark_read(&mut self, id: i64) -> PortResult<()> {
        let Some(index) = self.items.iter().position(|n| n.id == id) else {
            return Ok(());
        };
        if self.items[index].is_read {
            return Ok(());
        }

        self.items[index].is_read = true;
        match self.api.mark_notification_read(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(id, error = %err, "mark-as-read failed, rolling back");
                if let Some(item) = self.items.iter_mut().find(|n| n.id == id) {
                    item.is_read = false;
                }
                Err(err)
            }
        }
    }

    /// Marks every cached notification as read with a single batch call.
    ///
    /// On failure all local flips are rolled back.
    pub async fn mark_all_read(&mut self) -> PortResult<()> {
        let Some(user_id) = self.session.borrow().as_ref().map(|u| u.id) else {
            return Ok(());
        };
        let flipped: Vec<i64> = self
            .items
            .iter()
            .filter(|n| !n.is_read)
            .map(|n| n.id)
            .collect();
        if flipped.is_empty() {
            return Ok(());
        }

        for item in &mut self.items {
            item.is_read = true;
        }
        match self.api.mark_all_notifications_read(user_id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(user_id, error = %err, "mark-all-read failed, rolling back");
                for item in &mut self.items {
                    if flipped.contains(&item.id) {
                        item.is_read = false;
                    }
                }
                Err(err)
            }
        }
    }
}
