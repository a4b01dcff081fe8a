//! services/client/src/adapters/http.rs
//!
//! The reqwest adapter for the marketplace API. Implements the
//! `MarketplaceApi` port from the core crate.
//!
//! Any non-2xx status is a failure regardless of body shape; error bodies
//! are read as plain text and surfaced verbatim when present. Nothing here
//! retries: every operation fails fast on the first error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use praktika_core::domain::{
    FieldValue, Identity, Internship, Notification, Role, SubmissionPayload,
};
use praktika_core::ports::{MarketplaceApi, PortError, PortResult};

use crate::config::Config;

//=========================================================================================
// The Adapter Struct
//=========================================================================================

/// An adapter that implements `MarketplaceApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpMarketplaceAdapter {
    base_url: String,
    http: reqwest::Client,
}

impl HttpMarketplaceAdapter {
    pub fn new(
        base_url: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityDto {
    id: i64,
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    role: String,
    #[serde(default)]
    organization_id: Option<i64>,
    #[serde(default)]
    university_id: Option<i64>,
}

impl IdentityDto {
    fn into_domain(self) -> PortResult<Identity> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| PortError::Unexpected(format!("unrecognised role '{}'", self.role)))?;
        Ok(Identity {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            organization_id: self.organization_id,
            university_id: self.university_id,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationDto {
    id: i64,
    title: String,
    message: String,
    #[serde(default)]
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationDto> for Notification {
    fn from(dto: NotificationDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            message: dto.message,
            is_read: dto.is_read,
            created_at: dto.created_at,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InternshipDto {
    id: i64,
    title: String,
    #[serde(default)]
    organization_name: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    spots_available: i64,
}

impl From<InternshipDto> for Internship {
    fn from(dto: InternshipDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            organization_name: dto.organization_name,
            location: dto.location,
            spots_available: dto.spots_available,
        }
    }
}

//=========================================================================================
// Request/Response Plumbing
//=========================================================================================

/// Serializes a workflow payload as a flat JSON object.
fn payload_json(payload: &SubmissionPayload) -> Value {
    let mut map = serde_json::Map::new();
    for (name, value) in &payload.fields {
        let json_value = match value {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Number(number) => Value::Number((*number).into()),
            FieldValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
        };
        map.insert(name.clone(), json_value);
    }
    Value::Object(map)
}

/// Maps a non-2xx status and its body text to a port error.
fn rejection(status: StatusCode, body: &str) -> PortError {
    let body = body.trim();
    if status == StatusCode::NOT_FOUND {
        if body.is_empty() {
            return PortError::NotFound(format!("Not found ({status})"));
        }
        return PortError::NotFound(body.to_string());
    }
    if body.is_empty() {
        return PortError::Rejected(format!("Request failed ({status})"));
    }
    PortError::Rejected(body.to_string())
}

fn network(err: reqwest::Error) -> PortError {
    PortError::Network(err.to_string())
}

fn decode(err: reqwest::Error) -> PortError {
    PortError::Unexpected(err.to_string())
}

/// Passes 2xx responses through; everything else becomes a `PortError`
/// carrying the body text. The body is never assumed to be JSON.
async fn checked(response: reqwest::Response) -> PortResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(rejection(status, &body))
}

//=========================================================================================
// `MarketplaceApi` Trait Implementation
//=========================================================================================

#[async_trait]
impl MarketplaceApi for HttpMarketplaceAdapter {
    async fn login(&self, email: &str, password: &str) -> PortResult<Identity> {
        debug!(email, "POST /api/auth/login");
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(network)?;
        let dto: IdentityDto = checked(response).await?.json().await.map_err(decode)?;
        dto.into_domain()
    }

    async fn register(&self, payload: &SubmissionPayload) -> PortResult<Identity> {
        debug!("POST /api/auth/register");
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&payload_json(payload))
            .send()
            .await
            .map_err(network)?;
        let dto: IdentityDto = checked(response).await?.json().await.map_err(decode)?;
        dto.into_domain()
    }

    async fn notifications(&self, user_id: i64) -> PortResult<Vec<Notification>> {
        debug!(user_id, "GET /api/notifications");
        let response = self
            .http
            .get(self.url("/api/notifications"))
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(network)?;
        let dtos: Vec<NotificationDto> = checked(response).await?.json().await.map_err(decode)?;
        Ok(dtos.into_iter().map(Notification::from).collect())
    }

    async fn mark_notification_read(&self, id: i64) -> PortResult<()> {
        debug!(id, "PUT /api/notifications/{{id}}/read");
        let response = self
            .http
            .put(self.url(&format!("/api/notifications/{id}/read")))
            .send()
            .await
            .map_err(network)?;
        checked(response).await?;
        Ok(())
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> PortResult<()> {
        debug!(user_id, "PUT /api/notifications/read-all");
        let response = self
            .http
            .put(self.url("/api/notifications/read-all"))
            .query(&[("userId", user_id)])
            .send()
            .await
            .map_err(network)?;
        checked(response).await?;
        Ok(())
    }

    async fn internships(&self) -> PortResult<Vec<Internship>> {
        debug!("GET /api/internships");
        let response = self
            .http
            .get(self.url("/api/internships"))
            .send()
            .await
            .map_err(network)?;
        let dtos: Vec<InternshipDto> = checked(response).await?.json().await.map_err(decode)?;
        Ok(dtos.into_iter().map(Internship::from).collect())
    }

    async fn internship(&self, id: i64) -> PortResult<Internship> {
        debug!(id, "GET /api/internships/{{id}}");
        let response = self
            .http
            .get(self.url(&format!("/api/internships/{id}")))
            .send()
            .await
            .map_err(network)?;
        let dto: InternshipDto = checked(response).await?.json().await.map_err(decode)?;
        Ok(dto.into())
    }

    async fn post_internship(&self, payload: &SubmissionPayload) -> PortResult<()> {
        debug!("POST /api/internships");
        let response = self
            .http
            .post(self.url("/api/internships"))
            .json(&payload_json(payload))
            .send()
            .await
            .map_err(network)?;
        checked(response).await?;
        Ok(())
    }

    async fn submit_application(&self, payload: &SubmissionPayload) -> PortResult<()> {
        debug!("POST /api/applications");
        let response = self
            .http
            .post(self.url("/api/applications"))
            .json(&payload_json(payload))
            .send()
            .await
            .map_err(network)?;
        checked(response).await?;
        Ok(())
    }
}
