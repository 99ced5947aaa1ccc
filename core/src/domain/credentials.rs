//! Submitted credential sets and their structural validation

use serde::{Deserialize, Serialize};
use shared::utils::validation::is_valid_email;

use crate::errors::ValidationError;

/// Minimum password length accepted by the gateway (mirrors the identity
/// API's own policy so obviously bad input never leaves the building)
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Credentials submitted at a flow entry point.
///
/// Registration carries `full_name` and `confirm_password`; login carries
/// only email and password. The invariant `password == confirm_password`
/// holds at submission time whenever both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

impl Credentials {
    /// Credentials for a login attempt
    pub fn for_login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: None,
            confirm_password: None,
        }
    }

    /// Credentials for a registration attempt
    pub fn for_registration(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: Some(full_name.into()),
            confirm_password: Some(confirm_password.into()),
        }
    }

    /// Structural validation of the credential set.
    ///
    /// Checks, in order: required fields, email syntax, password length,
    /// and password/confirmation agreement when a confirmation is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            });
        }
        if self.password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            });
        }
        if let Some(name) = &self.full_name {
            if name.trim().is_empty() {
                return Err(ValidationError::RequiredField {
                    field: "full_name".to_string(),
                });
            }
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if let Some(confirm) = &self.confirm_password {
            if confirm != &self.password {
                return Err(ValidationError::PasswordMismatch);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration_credentials() {
        let creds = Credentials::for_registration("Ada Lovelace", "a@b.com", "secret1", "secret1");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_valid_login_credentials() {
        let creds = Credentials::for_login("a@b.com", "secret1");
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let creds = Credentials::for_registration("Ada", "a@b.com", "secret1", "secret2");
        assert_eq!(creds.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_short_password_rejected() {
        let creds = Credentials::for_login("a@b.com", "abc");
        assert_eq!(
            creds.validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_invalid_email_rejected() {
        let creds = Credentials::for_login("not-an-email", "secret1");
        assert_eq!(creds.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_missing_fields_rejected() {
        let creds = Credentials::for_login("", "secret1");
        assert!(matches!(
            creds.validate(),
            Err(ValidationError::RequiredField { .. })
        ));

        let creds = Credentials::for_registration("  ", "a@b.com", "secret1", "secret1");
        assert!(matches!(
            creds.validate(),
            Err(ValidationError::RequiredField { .. })
        ));
    }
}
