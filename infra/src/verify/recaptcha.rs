//! reCAPTCHA siteverify client
//!
//! Forwards the browser-issued response token to Google's verification
//! endpoint. Every failure mode - transport error, non-2xx status, malformed
//! payload - is reported as a rejected verification, never as an acceptance.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use hrms_core::domain::VerificationResult;
use hrms_core::services::bot_check::BotVerifier;
use shared::config::RecaptchaConfig;

use crate::InfrastructureError;

/// Bot verifier backed by Google's reCAPTCHA siteverify API
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: Client,
    config: RecaptchaConfig,
}

/// Response body of the siteverify endpoint
#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default)]
    score: Option<f32>,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

impl RecaptchaVerifier {
    pub fn new(config: RecaptchaConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl BotVerifier for RecaptchaVerifier {
    async fn verify(&self, token: &str) -> VerificationResult {
        let request = self
            .client
            .get(&self.config.verify_url)
            .query(&[("secret", self.config.secret_key.as_str()), ("response", token)]);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("reCAPTCHA verification request failed: {}", e);
                return VerificationResult::rejected();
            }
        };

        if !response.status().is_success() {
            warn!(
                "reCAPTCHA verification returned status {}",
                response.status()
            );
            return VerificationResult::rejected();
        }

        let body = match response.json::<SiteverifyResponse>().await {
            Ok(body) => body,
            Err(e) => {
                warn!("reCAPTCHA verification payload was unreadable: {}", e);
                return VerificationResult::rejected();
            }
        };

        if !body.success {
            debug!(
                "reCAPTCHA verification rejected the token: {:?}",
                body.error_codes
            );
            return VerificationResult::rejected();
        }

        VerificationResult::accepted(body.score)
    }
}
