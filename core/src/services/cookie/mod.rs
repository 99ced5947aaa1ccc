//! Persistent identity cookie codec
//!
//! When "remember me" is chosen, the authenticated identity is mirrored
//! into a long-lived signed cookie so the session can be rehydrated after
//! a browser restart without re-authentication. The cookie value is an
//! HS256 JWT carrying `{name, email, token, exp}`; expiry is independent
//! of the session idle timeout (days versus minutes).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::AuthenticatedSession;

#[derive(Error, Debug)]
pub enum CookieError {
    #[error("Failed to sign identity cookie: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by the persistent identity cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityCookieClaims {
    /// Display name
    pub name: String,
    /// Authenticated email
    pub email: String,
    /// Bearer token for the identity API
    pub token: String,
    /// Expiry as a Unix timestamp
    pub exp: i64,
}

/// Signs and validates the persistent identity cookie
pub struct IdentityCookieCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl IdentityCookieCodec {
    /// Create a codec with the signing secret and cookie lifetime.
    ///
    /// Expiry is validated without leeway: a cookie past its `exp` is dead
    /// the moment it expires.
    pub fn new(secret: &str, lifetime_seconds: u64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: Duration::seconds(lifetime_seconds as i64),
        }
    }

    /// Sign an authenticated session into a cookie value
    pub fn encode(&self, session: &AuthenticatedSession) -> Result<String, CookieError> {
        let claims = IdentityCookieClaims {
            name: session.full_name.clone(),
            email: session.email.clone(),
            token: session.token.clone(),
            exp: (Utc::now() + self.lifetime).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Validate a cookie value and recover its claims.
    ///
    /// Returns `None` for anything unusable: bad signature, expired,
    /// malformed. An invalid cookie is ignored, never an error.
    pub fn decode(&self, value: &str) -> Option<IdentityCookieClaims> {
        match decode::<IdentityCookieClaims>(value, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!("Rejected identity cookie: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIFETIME_7_DAYS: u64 = 7 * 24 * 60 * 60;

    fn session() -> AuthenticatedSession {
        AuthenticatedSession::new("bearer-xyz", "Ada Lovelace", "a@b.com")
    }

    #[test]
    fn test_round_trip() {
        let codec = IdentityCookieCodec::new("unit-test-secret", LIFETIME_7_DAYS);
        let value = codec.encode(&session()).unwrap();
        let claims = codec.decode(&value).unwrap();
        assert_eq!(claims.name, "Ada Lovelace");
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.token, "bearer-xyz");
    }

    #[test]
    fn test_expiry_is_seven_days_out() {
        let codec = IdentityCookieCodec::new("unit-test-secret", LIFETIME_7_DAYS);
        let value = codec.encode(&session()).unwrap();
        let claims = codec.decode(&value).unwrap();
        let expected = Utc::now().timestamp() + LIFETIME_7_DAYS as i64;
        // Allow a few seconds of test execution drift
        assert!((claims.exp - expected).abs() < 5);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let codec = IdentityCookieCodec::new("unit-test-secret", LIFETIME_7_DAYS);
        let other = IdentityCookieCodec::new("different-secret", LIFETIME_7_DAYS);
        let value = codec.encode(&session()).unwrap();
        assert!(other.decode(&value).is_none());
    }

    #[test]
    fn test_expired_cookie_rejected() {
        let codec = IdentityCookieCodec::new("unit-test-secret", LIFETIME_7_DAYS);
        let claims = IdentityCookieClaims {
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            token: "bearer-xyz".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let value = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap();
        assert!(codec.decode(&value).is_none());
    }

    #[test]
    fn test_garbage_rejected() {
        let codec = IdentityCookieCodec::new("unit-test-secret", LIFETIME_7_DAYS);
        assert!(codec.decode("not-a-jwt").is_none());
        assert!(codec.decode("").is_none());
    }
}
