use actix_web::{web, HttpResponse};
use validator::Validate;

use hrms_core::{BotVerifier, IdentityClient, SessionStore};

use crate::dto::auth_dto::{ForgotPasswordRequest, FormDescriptor, ResetPasswordRequest};
use crate::handlers::error::{flow_error_response, validation_error_response, LOGIN_PATH};

use super::AppState;

pub const FORGOT_PASSWORD_PATH: &str = "/auth/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";

/// Handler for GET /auth/forgot-password
pub async fn show_forgot_password() -> HttpResponse {
    HttpResponse::Ok().json(FormDescriptor {
        form: "forgot_password",
        action: FORGOT_PASSWORD_PATH,
        fields: vec!["email"],
        recaptcha_site_key: None,
    })
}

/// Handler for POST /auth/forgot-password
///
/// Unauthenticated pass-through; the upstream emails the reset token. The
/// acknowledgement is identical whether or not the address exists.
pub async fn submit_forgot_password<I, B, S>(
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<ForgotPasswordRequest>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.flow.forgot_password(&request.email).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "If the address is registered, a reset link has been sent."
        })),
        Err(error) => flow_error_response(&error, FORGOT_PASSWORD_PATH),
    }
}

/// Handler for GET /auth/reset-password
///
/// The form the emailed reset link lands on; the token travels with the
/// submission, not the session.
pub async fn show_reset_password() -> HttpResponse {
    HttpResponse::Ok().json(FormDescriptor {
        form: "reset_password",
        action: RESET_PASSWORD_PATH,
        fields: vec!["token", "email", "new_password"],
        recaptcha_site_key: None,
    })
}

/// Handler for POST /auth/reset-password
pub async fn submit_reset_password<I, B, S>(
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .flow
        .reset_password(&request.token, &request.email, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::SeeOther()
            .insert_header(("Location", LOGIN_PATH))
            .finish(),
        Err(error) => flow_error_response(&error, FORGOT_PASSWORD_PATH),
    }
}
