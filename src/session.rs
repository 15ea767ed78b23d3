//! Session manager: the single owner of authentication state.
//!
//! DESIGN
//! ======
//! The current session lives in one `watch` slot. Reads borrow the slot, so
//! `is_authenticated()` is always recomputed from the value that is actually
//! there. Writes replace the whole value in one step and wake every
//! subscriber before returning.
//!
//! TRADE-OFFS
//! ==========
//! Storage and memory are updated in two steps (storage first) with no
//! atomicity between them. Concurrent logins are not serialized: whichever
//! transport call completes last owns both storage and the slot. The
//! post-await mutation has no await point, so a session is never assembled
//! from two different responses.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::storage::TokenStorage;
use crate::transport::{AuthTransport, Credentials, LoginResponse, TransportError};

/// Storage key holding the raw token.
pub const TOKEN_KEY: &str = "token_access";

/// The current authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    /// Identity payload from the login response. `None` for a session
    /// restored from storage, since only the token is persisted.
    pub user: Option<Value>,
}

impl Session {
    #[must_use]
    pub fn restored(token: String) -> Self {
        Self { token, user: None }
    }

    #[must_use]
    pub fn authenticated(token: String, user: Value) -> Self {
        Self { token, user: Some(user) }
    }
}

/// Owns the session slot and the login/logout operations.
pub struct SessionManager {
    transport: Arc<dyn AuthTransport>,
    storage: Arc<dyn TokenStorage>,
    state: watch::Sender<Option<Session>>,
}

impl SessionManager {
    /// Build the manager and restore any persisted token.
    #[must_use]
    pub fn new(transport: Arc<dyn AuthTransport>, storage: Arc<dyn TokenStorage>) -> Self {
        let (state, _) = watch::channel(Self::restore(storage.as_ref()));
        Self { transport, storage, state }
    }

    fn restore(storage: &dyn TokenStorage) -> Option<Session> {
        let Some(token) = storage.get(TOKEN_KEY) else {
            debug!("no persisted session");
            return None;
        };
        info!("session restored from storage");
        Some(Session::restored(token))
    }

    /// Log in through the transport.
    ///
    /// On success the token is persisted and the slot replaced with the
    /// returned token and user. On failure nothing changes and the transport
    /// error is returned as-is.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError> {
        let response = match self.transport.login(credentials).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "login failed");
                return Err(e);
            }
        };

        self.storage.set(TOKEN_KEY, &response.token);
        let session = Session::authenticated(response.token.clone(), response.user.clone());
        self.state.send_replace(Some(session));
        info!("login succeeded");
        Ok(response)
    }

    /// Clear the persisted token and the session. Safe to call repeatedly.
    pub fn logout(&self) {
        self.storage.remove(TOKEN_KEY);
        let was_authenticated = self.state.send_if_modified(|slot| slot.take().is_some());
        if was_authenticated {
            info!("logged out");
        }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current_user(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Token of the current session, for building `Authorization` headers.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|session| session.token.clone())
    }

    /// Receiver notified on every login and logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }
}
