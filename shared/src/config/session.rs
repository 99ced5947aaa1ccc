//! Session and persistent-cookie configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the server-side session and the persistent
/// "remember me" identity cookie.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Name of the session-id cookie presented by the browser
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,

    /// Name of the signed persistent identity cookie
    #[serde(default = "default_identity_cookie_name")]
    pub identity_cookie_name: String,

    /// Session idle timeout in seconds (session entries expire after this)
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,

    /// Lifetime of the persistent identity cookie in seconds
    #[serde(default = "default_cookie_lifetime")]
    pub identity_cookie_lifetime_seconds: u64,

    /// Secret used to sign the persistent identity cookie
    pub cookie_signing_secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: default_session_cookie_name(),
            identity_cookie_name: default_identity_cookie_name(),
            idle_timeout_seconds: default_idle_timeout(),
            identity_cookie_lifetime_seconds: default_cookie_lifetime(),
            cookie_signing_secret: String::new(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let idle_timeout_seconds = std::env::var("SESSION_IDLE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_idle_timeout);
        let identity_cookie_lifetime_seconds = std::env::var("IDENTITY_COOKIE_LIFETIME_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_cookie_lifetime);
        let cookie_signing_secret = std::env::var("COOKIE_SIGNING_SECRET")
            .unwrap_or_default();

        Self {
            idle_timeout_seconds,
            identity_cookie_lifetime_seconds,
            cookie_signing_secret,
            ..Default::default()
        }
    }
}

fn default_session_cookie_name() -> String {
    String::from("hrms_session")
}

fn default_identity_cookie_name() -> String {
    String::from("hrms_identity")
}

/// 30-minute idle timeout for session entries
fn default_idle_timeout() -> u64 {
    30 * 60
}

/// 7-day lifetime for the "remember me" identity cookie
fn default_cookie_lifetime() -> u64 {
    7 * 24 * 60 * 60
}
