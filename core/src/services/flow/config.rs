//! Flow service configuration

/// Options for the consolidated authentication flow.
///
/// Defaults match the production posture: bot verification on, OTP
/// required, and "remember me" backed by the signed identity cookie.
#[derive(Debug, Clone)]
pub struct AuthFlowConfig {
    /// Gate credential submissions behind bot verification
    pub require_bot_verification: bool,

    /// Require the OTP step. When off, a login acknowledgement that
    /// carries a complete auth payload authenticates immediately.
    pub otp_required: bool,

    /// Honor "remember me" by issuing the persistent identity cookie
    pub persist_via_cookie: bool,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self {
            require_bot_verification: true,
            otp_required: true,
            persist_via_cookie: true,
        }
    }
}

impl AuthFlowConfig {
    /// Configuration without the bot gate, for environments where the
    /// verifier is not reachable (local development, tests)
    pub fn without_bot_verification() -> Self {
        Self {
            require_bot_verification: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_fully_gated() {
        let config = AuthFlowConfig::default();
        assert!(config.require_bot_verification);
        assert!(config.otp_required);
        assert!(config.persist_via_cookie);
    }
}
