//! Authorized API client.
//!
//! Attaches the session token as a bearer credential to every outgoing
//! request and runs the forced-logout protocol when the server answers 401.
//!
//! ERROR HANDLING
//! ==============
//! A 401 on a request that carried a bearer token is reported as
//! `RequestError::Unauthorized` after the session has already been cleared
//! and the navigator sent to the login route, so callers only need to stop
//! what they were doing. A 401 on a request sent without a token is not an
//! authenticated call and comes back as a plain `RequestError::Status`.
//!
//! TRADE-OFFS
//! ==========
//! The forced logout does not compare the rejected token with the current
//! one. If a newer login replaced the session while a request carrying the
//! older token was in flight, the 401 for that request still clears the newer
//! session. Together with the two-step storage/memory write in
//! `SessionManager`, this is a known gap rather than a guarantee.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::config::join_url;
use crate::guard::{Navigator, force_logout};
use crate::session::SessionManager;
use crate::transport::failure_message;

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("session rejected by server; logged out")]
    Unauthorized,
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// HTTP client bound to the shared session.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
    navigator: Arc<dyn Navigator>,
}

impl AuthorizedClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Arc<SessionManager>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, session, navigator)
    }

    #[must_use]
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { http, base_url: base_url.into(), session, navigator }
    }

    pub async fn get(&self, path: &str) -> Result<Value, RequestError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value, RequestError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Send a JSON request with the current bearer token, if any.
    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, RequestError> {
        let url = join_url(&self.base_url, path);
        let mut req = self.http.request(method, url);
        let sent_token = self.session.token();
        if let Some(token) = &sent_token {
            req = req.header(AUTHORIZATION, bearer(token));
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::UNAUTHORIZED && sent_token.is_some() {
            force_logout(&self.session, self.navigator.as_ref());
            return Err(RequestError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RequestError::Status { status: status.as_u16(), message: failure_message(status, &text) });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
