//! Login transport: the network half of the session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionManager` only sees the `AuthTransport` trait. `HttpTransport` is
//! the production implementation; tests substitute scripted transports.
//!
//! ERROR HANDLING
//! ==============
//! Every non-success is returned as a `TransportError` and forwarded by the
//! session manager untouched. Nothing here retries or applies a timeout
//! beyond what the underlying `reqwest::Client` is configured with.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SessionConfig;

/// Raw email/password pair collected by the form layer.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login payload. Fields beyond `token` and `user` are kept in
/// `extra` so callers can read whatever else the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LoginResponse {
    #[must_use]
    pub fn new(token: impl Into<String>, user: Value) -> Self {
        Self { token: token.into(), user, extra: Map::new() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("login rejected with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid login response: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status of a server rejection, if that is what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Performs the login call.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError>;
}

// =============================================================================
// HTTP
// =============================================================================

/// Posts credentials as JSON to a fixed login URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    login_url: String,
}

impl HttpTransport {
    #[must_use]
    pub fn new(login_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), login_url)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, login_url: impl Into<String>) -> Self {
        Self { client, login_url: login_url.into() }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.login_url())
    }

    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError> {
        let resp = self
            .client
            .post(&self.login_url)
            .json(credentials)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), message: failure_message(status, &body) });
        }
        decode_login_response(&body)
    }
}

pub(crate) fn decode_login_response(body: &str) -> Result<LoginResponse, TransportError> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
}

/// Human-readable reason for a failed response: the `message` or `error`
/// field of a JSON body, else the text body, else the reason phrase.
pub(crate) fn failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(Value::String(message)) = fields.get(key) {
                return message.clone();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_owned();
    }
    status.canonical_reason().unwrap_or("request failed").to_owned()
}
