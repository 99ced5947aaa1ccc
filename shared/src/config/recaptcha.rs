//! Bot-verification (reCAPTCHA) configuration module

use serde::{Deserialize, Serialize};

/// Configuration for the external bot-verification service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecaptchaConfig {
    /// Verification endpoint
    #[serde(default = "default_verify_url")]
    pub verify_url: String,

    /// Server-side secret key
    pub secret_key: String,

    /// Site key handed to the browser widget
    #[serde(default)]
    pub site_key: String,

    /// Minimum acceptable trust score. When unset, the verifier's success
    /// flag alone decides. Source deployments disagree on a value, so no
    /// default is baked in.
    #[serde(default)]
    pub score_threshold: Option<f32>,

    /// Timeout in seconds for the verification call
    #[serde(default = "default_verify_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RecaptchaConfig {
    fn default() -> Self {
        Self {
            verify_url: default_verify_url(),
            secret_key: String::new(),
            site_key: String::new(),
            score_threshold: None,
            timeout_seconds: default_verify_timeout(),
        }
    }
}

impl RecaptchaConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret_key = std::env::var("RECAPTCHA_SECRET_KEY").unwrap_or_default();
        let site_key = std::env::var("RECAPTCHA_SITE_KEY").unwrap_or_default();
        let score_threshold = std::env::var("BOT_SCORE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            secret_key,
            site_key,
            score_threshold,
            ..Default::default()
        }
    }
}

fn default_verify_url() -> String {
    String::from("https://www.google.com/recaptcha/api/siteverify")
}

fn default_verify_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recaptcha_config_default() {
        let config = RecaptchaConfig::default();
        assert!(config.verify_url.contains("siteverify"));
        assert!(config.score_threshold.is_none());
        assert_eq!(config.timeout_seconds, 5);
    }
}
