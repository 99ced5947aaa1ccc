//! Flow error types
//!
//! Every error here is per-request and recoverable: the user re-renders a
//! form, retries a check, or is redirected back to a flow entry point. No
//! variant is fatal to the process, and none may be produced on a path
//! that ends in an authenticated session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result alias used throughout the flow service
pub type FlowResult<T> = Result<T, FlowError>;

/// Structural validation failures, recovered locally by re-rendering the
/// form with field errors
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Session store failures (the store itself, not the flow state in it)
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session store unavailable: {0}")]
    Store(String),

    #[error("Session data corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors produced by the authentication flow state machines
#[derive(Error, Debug)]
pub enum FlowError {
    /// Malformed input; re-render the form
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Bot verification rejected the submission (or failed closed)
    #[error("Please complete the security check and try again")]
    SecurityCheckFailed,

    /// The identity API rejected a registration; the upstream message is
    /// surfaced verbatim
    #[error("Registration failed: {message}")]
    RegistrationRejected { message: String },

    /// The identity API rejected the credential pair
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity API rejected a password-management or profile request;
    /// the upstream message is surfaced verbatim
    #[error("{message}")]
    RequestRejected { message: String },

    /// The identity API rejected the OTP, or returned an absent/partial
    /// success payload
    #[error("Invalid or expired OTP")]
    InvalidOtp,

    /// An OTP step was reached without a pending flow. Not user-facing:
    /// handlers redirect silently to the flow's entry point.
    #[error("No authentication flow in progress")]
    MissingFlowState,

    /// An authenticated-area operation was attempted without a session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Network or timeout talking to the identity API or verifier
    #[error("Unable to reach the authentication service. Please try again")]
    UpstreamUnavailable,

    /// The session store itself failed
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl FlowError {
    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            FlowError::Validation(_) => "validation_error",
            FlowError::SecurityCheckFailed => "security_check_failed",
            FlowError::RegistrationRejected { .. } => "registration_rejected",
            FlowError::InvalidCredentials => "invalid_credentials",
            FlowError::RequestRejected { .. } => "request_rejected",
            FlowError::InvalidOtp => "invalid_otp",
            FlowError::MissingFlowState => "missing_flow_state",
            FlowError::NotAuthenticated => "not_authenticated",
            FlowError::UpstreamUnavailable => "upstream_unavailable",
            FlowError::Session(_) => "session_failure",
        }
    }
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details if available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a single detail to the error response
    pub fn with_detail(mut self, key: impl ToString, value: serde_json::Value) -> Self {
        let mut details = self.details.unwrap_or_default();
        details.insert(key.to_string(), value);
        self.details = Some(details);
        self
    }
}

impl From<&FlowError> for ErrorResponse {
    fn from(err: &FlowError) -> Self {
        ErrorResponse::new(err.code(), err.to_string())
    }
}
