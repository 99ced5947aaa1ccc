//! Identity API client trait
//!
//! The gateway never owns durable identity data; every state transition is
//! a call to the remote identity API. This trait is the seam: the flow
//! service sees tagged outcomes, never raw HTTP responses, so an absent or
//! partial payload cannot be mistaken for success.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failure talking to the identity API. Anything that
/// prevented a definitive answer: connect failure, timeout, DNS.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity API unreachable: {0}")]
    Unavailable(String),
}

impl From<IdentityError> for crate::errors::FlowError {
    fn from(err: IdentityError) -> Self {
        tracing::warn!("Identity API call failed: {}", err);
        crate::errors::FlowError::UpstreamUnavailable
    }
}

/// Tagged outcome of an identity API call that did complete.
///
/// `Rejected` carries the upstream error body so flows can surface it
/// verbatim where the design calls for that.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Success(T),
    Rejected { message: String },
}

impl<T> ApiOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// The rejection message, when this is a rejection
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ApiOutcome::Rejected { message } => Some(message),
            ApiOutcome::Success(_) => None,
        }
    }
}

/// Full authentication payload returned by `verify-login-otp`.
///
/// The API serializes property names in either camelCase or PascalCase
/// depending on revision; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "Token")]
    pub token: String,
    #[serde(alias = "Email")]
    pub email: String,
    #[serde(alias = "FullName")]
    pub full_name: String,
    #[serde(default, alias = "Expiration")]
    pub expiration: Option<DateTime<Utc>>,
}

/// Acknowledgement of a credential login. Most API deployments answer a
/// bare 2xx here and issue the token only after OTP verification; the
/// OTP-less variant returns the full payload immediately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginAck {
    pub auth: Option<AuthResponse>,
}

/// Registration request body, forwarded to the API as-is
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Profile payload for the bearer-authenticated profile endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(alias = "FullName")]
    pub full_name: String,
    #[serde(alias = "Email")]
    pub email: String,
}

/// Thin caller to the external identity API.
///
/// Every method distinguishes three cases: `Ok(Success(..))` — the API
/// said yes and the payload is complete; `Ok(Rejected{..})` — the API
/// answered and said no (including 2xx bodies that fail to parse into the
/// promised payload); `Err(..)` — no definitive answer was obtained.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// `POST register {fullName, email, password, confirmPassword}`
    async fn register(&self, request: &RegisterRequest) -> Result<ApiOutcome<()>, IdentityError>;

    /// `POST login {email, password}`. The caller's remember-me choice is
    /// deliberately not part of this call; it is session-local state.
    async fn login(&self, email: &str, password: &str)
        -> Result<ApiOutcome<LoginAck>, IdentityError>;

    /// `POST verify-register-otp {email, otp}`
    async fn verify_register_otp(
        &self,
        email: &str,
        otp: &str,
    ) -> Result<ApiOutcome<()>, IdentityError>;

    /// `POST verify-login-otp {email, otp, rememberMe}`
    async fn verify_login_otp(
        &self,
        email: &str,
        otp: &str,
        remember_me: bool,
    ) -> Result<ApiOutcome<AuthResponse>, IdentityError>;

    /// `POST change-password {oldPassword, newPassword}` (bearer-authenticated)
    async fn change_password(
        &self,
        bearer: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError>;

    /// `POST forgot-password {email}`
    async fn forgot_password(&self, email: &str) -> Result<ApiOutcome<()>, IdentityError>;

    /// `POST reset-password {token, email, newPassword}`
    async fn reset_password(
        &self,
        token: &str,
        email: &str,
        new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError>;

    /// `GET profile` (bearer-authenticated)
    async fn fetch_profile(&self, bearer: &str) -> Result<ApiOutcome<Profile>, IdentityError>;

    /// `PUT profile` (bearer-authenticated)
    async fn update_profile(
        &self,
        bearer: &str,
        profile: &Profile,
    ) -> Result<ApiOutcome<()>, IdentityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_accepts_pascal_case() {
        let json = r#"{"Token":"t1","Email":"a@b.com","FullName":"Ada"}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.token, "t1");
        assert_eq!(parsed.full_name, "Ada");
        assert!(parsed.expiration.is_none());
    }

    #[test]
    fn test_auth_response_accepts_camel_case() {
        let json = r#"{"token":"t1","email":"a@b.com","fullName":"Ada","expiration":"2026-01-01T00:00:00Z"}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.expiration.is_some());
    }

    #[test]
    fn test_register_request_serializes_camel_case() {
        let request = RegisterRequest {
            full_name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"confirmPassword\""));
    }

    #[test]
    fn test_outcome_rejection_message() {
        let outcome: ApiOutcome<()> = ApiOutcome::Rejected {
            message: "email taken".to_string(),
        };
        assert!(!outcome.is_success());
        assert_eq!(outcome.rejection_message(), Some("email taken"));
    }
}
