//! Application configuration
//!
//! Aggregates the per-concern config structs and the flow toggles, all
//! loaded from environment variables.

use std::env;

use hrms_core::AuthFlowConfig;
use shared::config::{IdentityApiConfig, RecaptchaConfig, ServerConfig, SessionConfig};

/// Everything the binary needs to wire the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub identity_api: IdentityApiConfig,
    pub recaptcha: RecaptchaConfig,
    pub flow: AuthFlowConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            session: SessionConfig::from_env(),
            identity_api: IdentityApiConfig::from_env(),
            recaptcha: RecaptchaConfig::from_env(),
            flow: flow_config_from_env(),
        }
    }
}

/// Flow toggles; each defaults to on
fn flow_config_from_env() -> AuthFlowConfig {
    AuthFlowConfig {
        require_bot_verification: env_flag("REQUIRE_BOT_VERIFICATION", true),
        otp_required: env_flag("OTP_REQUIRED", true),
        persist_via_cookie: env_flag("PERSIST_VIA_COOKIE", true),
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
