use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default, rename = "g-recaptcha-response")]
    pub recaptcha_token: Option<String>,
}

// The OTP format belongs to the identity API; only presence is checked here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OtpRequest {
    #[validate(length(min = 1, message = "OTP is required"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Reset token is required"))]
    pub token: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub old_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Descriptor of a credential form, returned by the GET flow entries
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub form: &'static str,
    pub action: &'static str,
    pub fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recaptcha_site_key: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub full_name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_rejects_mismatched_passwords() {
        let request = RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            remember_me: false,
            recaptcha_token: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_request_accepts_valid_input() {
        let request = RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            remember_me: true,
            recaptcha_token: Some("tok".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn recaptcha_token_deserializes_from_widget_field_name() {
        let request: LoginRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"pw","g-recaptcha-response":"tok-123"}"#,
        )
        .unwrap();
        assert_eq!(request.recaptcha_token.as_deref(), Some("tok-123"));
        assert!(!request.remember_me);
    }

    #[test]
    fn otp_request_checks_presence_not_format() {
        let empty = OtpRequest { otp: String::new() };
        assert!(empty.validate().is_err());

        // Length is the upstream's contract, not ours
        for otp in ["1234", "123456", "12345678"] {
            let request = OtpRequest {
                otp: otp.to_string(),
            };
            assert!(request.validate().is_ok());
        }
    }
}
