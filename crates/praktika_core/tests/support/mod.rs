//! Shared test double for the marketplace API port.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use praktika_core::domain::{Identity, Internship, Notification, Role, SubmissionPayload};
use praktika_core::ports::{MarketplaceApi, PortError, PortResult};
use praktika_core::session::SessionStore;

//=========================================================================================
// Fixtures
//=========================================================================================

pub fn identity_with_role(id: i64, role: Role) -> Identity {
    Identity {
        id,
        email: format!("{role}@example.com"),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        role,
        organization_id: (role == Role::Organization).then_some(5),
        university_id: (role == Role::University).then_some(3),
    }
}

pub fn student() -> Identity {
    Identity {
        email: "student@example.com".to_string(),
        ..identity_with_role(1, Role::Student)
    }
}

pub fn notification(id: i64, is_read: bool) -> Notification {
    Notification {
        id,
        title: format!("Notification {id}"),
        message: "Your application status changed.".to_string(),
        is_read,
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
    }
}

/// A store that has already completed a successful login against `api`.
pub async fn signed_in_store(api: Arc<MockApi>) -> SessionStore {
    let store = SessionStore::new(api);
    store
        .login("student@example.com", "secret1")
        .await
        .expect("test login should succeed");
    store
}

//=========================================================================================
// MockApi
//=========================================================================================

#[derive(Default)]
pub struct CallCounts {
    pub login: AtomicUsize,
    pub register: AtomicUsize,
    pub notifications: AtomicUsize,
    pub mark_read: AtomicUsize,
    pub mark_all_read: AtomicUsize,
    pub submit_application: AtomicUsize,
    pub post_internship: AtomicUsize,
}

/// Configurable in-memory implementation of the port.
///
/// Every operation returns a canned response and counts its calls; the
/// notification fetch can additionally be parked behind a [`Notify`] gate
/// to simulate a slow request.
pub struct MockApi {
    login_response: Mutex<PortResult<Identity>>,
    register_response: Mutex<PortResult<Identity>>,
    notifications_response: Mutex<PortResult<Vec<Notification>>>,
    mark_read_response: Mutex<PortResult<()>>,
    mark_all_response: Mutex<PortResult<()>>,
    submit_response: Mutex<PortResult<()>>,
    notifications_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: CallCounts,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    pub fn new() -> Self {
        let unconfigured = || PortError::Unexpected("not configured in this test".to_string());
        Self {
            login_response: Mutex::new(Err(unconfigured())),
            register_response: Mutex::new(Err(unconfigured())),
            notifications_response: Mutex::new(Ok(Vec::new())),
            mark_read_response: Mutex::new(Ok(())),
            mark_all_response: Mutex::new(Ok(())),
            submit_response: Mutex::new(Ok(())),
            notifications_gate: Mutex::new(None),
            calls: CallCounts::default(),
        }
    }

    pub fn with_identity(self, identity: Identity) -> Self {
        *self.login_response.lock().unwrap() = Ok(identity.clone());
        *self.register_response.lock().unwrap() = Ok(identity);
        self
    }

    pub fn with_login_error(self, err: PortError) -> Self {
        *self.login_response.lock().unwrap() = Err(err);
        self
    }

    pub fn with_register_error(self, err: PortError) -> Self {
        *self.register_response.lock().unwrap() = Err(err);
        self
    }

    pub fn with_notifications(self, items: Vec<Notification>) -> Self {
        *self.notifications_response.lock().unwrap() = Ok(items);
        self
    }

    pub fn with_mark_read_error(self, err: PortError) -> Self {
        *self.mark_read_response.lock().unwrap() = Err(err);
        self
    }

    pub fn with_mark_all_error(self, err: PortError) -> Self {
        *self.mark_all_response.lock().unwrap() = Err(err);
        self
    }

    pub fn with_submit_error(self, err: PortError) -> Self {
        *self.submit_response.lock().unwrap() = Err(err);
        self
    }

    /// Parks every notification fetch until the gate is notified.
    pub fn with_notifications_gate(self, gate: Arc<Notify>) -> Self {
        *self.notifications_gate.lock().unwrap() = Some(gate);
        self
    }

    pub fn set_login_response(&self, response: PortResult<Identity>) {
        *self.login_response.lock().unwrap() = response;
    }

    pub fn set_notifications_response(&self, response: PortResult<Vec<Notification>>) {
        *self.notifications_response.lock().unwrap() = response;
    }

    pub fn set_submit_response(&self, response: PortResult<()>) {
        *self.submit_response.lock().unwrap() = response;
    }
}

#[async_trait]
impl MarketplaceApi for MockApi {
    async fn login(&self, _email: &str, _password: &str) -> PortResult<Identity> {
        self.calls.login.fetch_add(1, Ordering::SeqCst);
        self.login_response.lock().unwrap().clone()
    }

    async fn register(&self, _payload: &SubmissionPayload) -> PortResult<Identity> {
        self.calls.register.fetch_add(1, Ordering::SeqCst);
        self.register_response.lock().unwrap().clone()
    }

    async fn notifications(&self, _user_id: i64) -> PortResult<Vec<Notification>> {
        self.calls.notifications.fetch_add(1, Ordering::SeqCst);
        let gate = self.notifications_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.notifications_response.lock().unwrap().clone()
    }

    async fn mark_notification_read(&self, _id: i64) -> PortResult<()> {
        self.calls.mark_read.fetch_add(1, Ordering::SeqCst);
        self.mark_read_response.lock().unwrap().clone()
    }

    async fn mark_all_notifications_read(&self, _user_id: i64) -> PortResult<()> {
        self.calls.mark_all_read.fetch_add(1, Ordering::SeqCst);
        self.mark_all_response.lock().unwrap().clone()
    }

    async fn internships(&self) -> PortResult<Vec<Internship>> {
        Ok(Vec::new())
    }

    async fn internship(&self, id: i64) -> PortResult<Internship> {
        Err(PortError::NotFound(format!("internship {id}")))
    }

    async fn post_internship(&self, _payload: &SubmissionPayload) -> PortResult<()> {
        self.calls.post_internship.fetch_add(1, Ordering::SeqCst);
        self.submit_response.lock().unwrap().clone()
    }

    async fn submit_application(&self, _payload: &SubmissionPayload) -> PortResult<()> {
        self.calls.submit_application.fetch_add(1, Ordering::SeqCst);
        self.submit_response.lock().unwrap().clone()
    }
}
