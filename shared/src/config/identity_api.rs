//! Identity API client configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the upstream identity API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityApiConfig {
    /// Base URL of the identity API, e.g. `http://localhost:5173/api/auth`
    pub base_url: String,

    /// Request timeout in seconds for outbound calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for IdentityApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:5173/api/auth"),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl IdentityApiConfig {
    /// Create a new configuration with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let base_url = std::env::var("IDENTITY_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173/api/auth".to_string());
        let request_timeout_seconds = std::env::var("IDENTITY_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout);

        Self {
            base_url,
            request_timeout_seconds,
        }
    }

    /// Build the full URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        let config = IdentityApiConfig::new("http://localhost:5173/api/auth/");
        assert_eq!(
            config.endpoint("/verify-login-otp"),
            "http://localhost:5173/api/auth/verify-login-otp"
        );
        assert_eq!(
            config.endpoint("register"),
            "http://localhost:5173/api/auth/register"
        );
    }
}
