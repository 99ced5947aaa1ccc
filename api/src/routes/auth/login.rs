use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use hrms_core::{BotVerifier, FlowAdvance, FlowKind, IdentityClient, SessionStore};

use crate::dto::auth_dto::{FormDescriptor, LoginRequest, OtpRequest};
use crate::handlers::error::{flow_error_response, see_other, validation_error_response, LOGIN_PATH};
use crate::session::{apply_session_cookie, bind_session, identity_cookie};

use super::AppState;

pub const LOGIN_OTP_PATH: &str = "/auth/login/verify-otp";

/// Handler for GET /auth/login
pub async fn show_login<I, B, S>(
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
                form: "login",
                action: LOGIN_PATH,
                fields: vec!["email", "password", "remember_me"],
                recaptcha_site_key: state.site_key(),
            };
            apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(descriptor)
        }
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// Handler for POST /auth/login
///
/// Accepted credentials park a pending login flow and send the browser to
/// the OTP entry. When the upstream has OTP disabled the login completes
/// immediately, including the persistent cookie when remember-me was on.
pub async fn submit_login<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<LoginRequest>,
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

    match state
        .flow
        .login(
            &ctx,
            &request.email,
            &request.password,
            request.remember_me,
            request.recaptcha_token.as_deref(),
        )
        .await
    {
        Ok(FlowAdvance::OtpPending(_)) => {
            apply_session_cookie(&mut HttpResponse::SeeOther(), new_cookie)
                .insert_header(("Location", LOGIN_OTP_PATH))
                .finish()
        }
        Ok(FlowAdvance::Authenticated {
            identity_cookie: cookie_value,
            ..
        }) => authenticated_redirect(&state, new_cookie, cookie_value),
        Ok(FlowAdvance::Verified) => see_other(LOGIN_PATH),
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// Handler for GET /auth/login/verify-otp
pub async fn show_login_otp<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);

    match state.flow.otp_entry_allowed(&ctx, FlowKind::Login).await {
        Ok(()) => {
            let descriptor = FormDescriptor {
                form: "login_otp",
                action: LOGIN_OTP_PATH,
                fields: vec!["otp"],
                recaptcha_site_key: None,
            };
            apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(descriptor)
        }
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// Handler for POST /auth/login/verify-otp
///
/// A verified OTP establishes the session and sends the browser to the
/// dashboard, setting the signed identity cookie when remember-me was
/// chosen at credential time.
pub async fn submit_login_otp<I, B, S>(
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

    match state.flow.verify_login_otp(&ctx, &request.otp).await {
        Ok(FlowAdvance::Authenticated {
            identity_cookie: cookie_value,
            ..
        }) => authenticated_redirect(&state, new_cookie, cookie_value),
        Ok(_) => see_other(LOGIN_PATH),
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// 303 to the dashboard, attaching the session-id cookie on first touch
/// and the signed identity cookie when the flow produced one
fn authenticated_redirect<I, B, S>(
    state: &web::Data<AppState<I, B, S>>,
    new_cookie: Option<actix_web::cookie::Cookie<'static>>,
    identity_value: Option<String>,
) -> HttpResponse
where
    I: IdentityClient,
    B: BotVerifier,
    S: SessionStore,
{
    let mut builder = HttpResponse::SeeOther();
    builder.insert_header(("Location", "/dashboard"));
    apply_session_cookie(&mut builder, new_cookie);
    if let Some(value) = identity_value {
        builder.cookie(identity_cookie(&state.session_config, value));
    }
    builder.finish()
}
