//! Session configuration loaded from the environment.
//!
//! SYSTEM CONTEXT
//! ==============
//! The CLI reads the same variables through clap's `env` attributes; library
//! embedders call `SessionConfig::from_env()` directly.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";
pub const DEFAULT_STORAGE_PATH: &str = ".authshell/storage.json";

/// Where the auth server lives and where the token is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub base_url: String,
    pub login_path: String,
    pub storage_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            login_path: DEFAULT_LOGIN_PATH.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl SessionConfig {
    /// Load from `AUTHSHELL_BASE_URL`, `AUTHSHELL_LOGIN_PATH` and
    /// `AUTHSHELL_STORAGE_PATH`, falling back to defaults for unset or blank
    /// variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            base_url: env_or("AUTHSHELL_BASE_URL", DEFAULT_BASE_URL),
            login_path: env_or("AUTHSHELL_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            storage_path: PathBuf::from(env_or("AUTHSHELL_STORAGE_PATH", DEFAULT_STORAGE_PATH)),
        }
    }

    /// Absolute URL of the login endpoint.
    #[must_use]
    pub fn login_url(&self) -> String {
        join_url(&self.base_url, &self.login_path)
    }
}

/// Join a base URL and a path with exactly one `/` between them.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub(crate) fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_owned(),
        _ => default.to_owned(),
    }
}
