//! The authenticated session established after OTP verification

use serde::{Deserialize, Serialize};

use crate::clients::identity::AuthResponse;

/// Identity of a fully authenticated browser session.
///
/// Owned by the session store for the life of the browser session and,
/// when "remember me" was chosen, mirrored into the persistent identity
/// cookie with its own independent expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// Opaque bearer token for calls to the identity API
    pub token: String,
    /// Display name of the user
    pub full_name: String,
    /// Email the user authenticated with
    pub email: String,
}

impl AuthenticatedSession {
    pub fn new(
        token: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Build a session from a complete identity API response.
    ///
    /// Returns `None` when the payload is missing its token; an absent or
    /// partial response must never become an authenticated session.
    pub fn from_auth_response(response: AuthResponse) -> Option<Self> {
        if response.token.is_empty() {
            return None;
        }
        Some(Self {
            token: response.token,
            full_name: response.full_name,
            email: response.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_auth_response_requires_token() {
        let response = AuthResponse {
            token: String::new(),
            email: "a@b.com".to_string(),
            full_name: "Ada".to_string(),
            expiration: None,
        };
        assert!(AuthenticatedSession::from_auth_response(response).is_none());
    }

    #[test]
    fn test_from_auth_response_with_token() {
        let response = AuthResponse {
            token: "bearer-xyz".to_string(),
            email: "a@b.com".to_string(),
            full_name: "Ada".to_string(),
            expiration: None,
        };
        let session = AuthenticatedSession::from_auth_response(response).unwrap();
        assert_eq!(session.token, "bearer-xyz");
        assert_eq!(session.email, "a@b.com");
    }
}
