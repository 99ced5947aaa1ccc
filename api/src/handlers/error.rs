//! Flow error to HTTP response mapping
//!
//! Every flow error maps to a stable status and machine-readable code.
//! The two navigation errors are not rendered as errors at all: a missing
//! pending flow sends the browser back to the flow's entry point, and an
//! unauthenticated request for a guarded resource goes to the login page.

use actix_web::http::header;
use actix_web::HttpResponse;
use std::collections::HashMap;

use hrms_core::errors::ErrorResponse;
use hrms_core::FlowError;

/// Path of the login entry, the fallback target for navigation errors
pub const LOGIN_PATH: &str = "/auth/login";

/// Map a flow error to its HTTP response.
///
/// `flow_entry` is where the browser is sent when the flow state is
/// missing; guarded-resource misses always go to the login page.
pub fn flow_error_response(error: &FlowError, flow_entry: &str) -> HttpResponse {
    match error {
        FlowError::MissingFlowState => see_other(flow_entry),
        FlowError::NotAuthenticated => see_other(LOGIN_PATH),
        FlowError::Validation(_) | FlowError::SecurityCheckFailed => {
            HttpResponse::BadRequest().json(ErrorResponse::from(error))
        }
        FlowError::RegistrationRejected { .. } | FlowError::RequestRejected { .. } => {
            HttpResponse::UnprocessableEntity().json(ErrorResponse::from(error))
        }
        FlowError::InvalidCredentials | FlowError::InvalidOtp => {
            HttpResponse::Unauthorized().json(ErrorResponse::from(error))
        }
        FlowError::UpstreamUnavailable => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::from(error))
        }
        FlowError::Session(e) => {
            log::error!("Session store failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::from(error))
        }
    }
}

/// Render `validator` field errors in the standard ErrorResponse shape
pub fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    details.insert("validation_errors".to_string(), serde_json::json!(errors));

    HttpResponse::BadRequest().json(ErrorResponse {
        error: "validation_error".to_string(),
        message: "Invalid request data".to_string(),
        details: Some(details),
        timestamp: chrono::Utc::now(),
    })
}

/// 303 See Other to the given location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn missing_flow_state_redirects_to_the_flow_entry() {
        let response = flow_error_response(&FlowError::MissingFlowState, "/auth/register");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/register"
        );
    }

    #[test]
    fn not_authenticated_redirects_to_login() {
        let response = flow_error_response(&FlowError::NotAuthenticated, "/auth/register");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);
    }

    #[test]
    fn registration_rejection_is_unprocessable() {
        let error = FlowError::RegistrationRejected {
            message: "email already registered".to_string(),
        };
        assert_eq!(
            flow_error_response(&error, "/auth/register").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn invalid_otp_is_unauthorized() {
        assert_eq!(
            flow_error_response(&FlowError::InvalidOtp, "/auth/login").status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn upstream_unavailable_is_service_unavailable() {
        assert_eq!(
            flow_error_response(&FlowError::UpstreamUnavailable, "/auth/login").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
