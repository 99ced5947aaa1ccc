use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use hrms_core::{
    BotVerifier, Credentials, FlowAdvance, FlowKind, IdentityClient, SessionStore,
};

use crate::dto::auth_dto::{FormDescriptor, OtpRequest, RegisterRequest};
use crate::handlers::error::{flow_error_response, see_other, validation_error_response};
use crate::session::{apply_session_cookie, bind_session};

use super::AppState;

pub const REGISTER_PATH: &str = "/auth/register";
pub const REGISTER_OTP_PATH: &str = "/auth/register/verify-otp";

/// Handler for GET /auth/register
///
/// Renders the registration form descriptor; an already-authenticated
/// session is sent straight to the dashboard.
pub async fn show_register<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);

    match state.flow.is_authenticated(&ctx).await {
        Ok(true) => see_other("/dashboard"),
        Ok(false) => {
            let descriptor = FormDescriptor {
                form: "register",
                action: REGISTER_PATH,
                fields: vec![
                    "full_name",
                    "email",
                    "password",
                    "confirm_password",
                    "remember_me",
                ],
                recaptcha_site_key: state.site_key(),
            };
            apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(descriptor)
        }
        Err(error) => flow_error_response(&error, REGISTER_PATH),
    }
}

/// Handler for POST /auth/register
///
/// Validates, runs the bot gate, submits the registration upstream, and on
/// success parks the pending flow and sends the browser to the OTP entry.
pub async fn submit_register<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);
    let credentials = Credentials::for_registration(
        &request.full_name,
        &request.email,
        &request.password,
        &request.confirm_password,
    );

    match state
        .flow
        .register(
            &ctx,
            &credentials,
            request.remember_me,
            request.recaptcha_token.as_deref(),
        )
        .await
    {
        Ok(FlowAdvance::OtpPending(_)) => {
            apply_session_cookie(&mut HttpResponse::SeeOther(), new_cookie)
                .insert_header(("Location", REGISTER_OTP_PATH))
                .finish()
        }
        // OTP disabled upstream: registration completes in one step
        Ok(FlowAdvance::Verified) | Ok(FlowAdvance::Authenticated { .. }) => {
            apply_session_cookie(&mut HttpResponse::SeeOther(), new_cookie)
                .insert_header(("Location", "/auth/login"))
                .finish()
        }
        Err(error) => flow_error_response(&error, REGISTER_PATH),
    }
}

/// Handler for GET /auth/register/verify-otp
///
/// Only reachable while a registration flow is pending; otherwise the
/// browser goes back to the registration form.
pub async fn show_register_otp<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);

    match state.flow.otp_entry_allowed(&ctx, FlowKind::Register).await {
        Ok(()) => {
            let descriptor = FormDescriptor {
                form: "register_otp",
                action: REGISTER_OTP_PATH,
                fields: vec!["otp"],
                recaptcha_site_key: None,
            };
            apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(descriptor)
        }
        Err(error) => flow_error_response(&error, REGISTER_PATH),
    }
}

/// Handler for POST /auth/register/verify-otp
///
/// A verified OTP completes registration and sends the browser to the
/// login form; a rejected one keeps the pending flow for another attempt.
pub async fn submit_register_otp<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<OtpRequest>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);

    match state.flow.verify_register_otp(&ctx, &request.otp).await {
        Ok(_) => apply_session_cookie(&mut HttpResponse::SeeOther(), new_cookie)
            .insert_header(("Location", "/auth/login"))
            .finish(),
        Err(error) => flow_error_response(&error, REGISTER_PATH),
    }
}
