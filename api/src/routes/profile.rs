use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use hrms_core::clients::identity::Profile;
use hrms_core::{BotVerifier, IdentityClient, SessionStore};

use crate::dto::auth_dto::{ChangePasswordRequest, ProfileResponse, UpdateProfileRequest};
use crate::handlers::error::{flow_error_response, validation_error_response, LOGIN_PATH};
use crate::session::{apply_session_cookie, bind_session};

use super::auth::AppState;
use super::resume_identity;

/// Handler for GET /profile
pub async fn show_profile<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    let (ctx, new_cookie) = bind_session(&req, &state.sessions, &state.session_config);

    if let Err(error) = resume_identity(&req, &state, &ctx).await {
        return flow_error_response(&error, LOGIN_PATH);
    }

    match state.flow.profile(&ctx).await {
        Ok(profile) => apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(
            ProfileResponse {
                full_name: profile.full_name,
                email: profile.email,
            },
        ),
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// Handler for PUT /profile
///
/// Pass-through to the identity API; a successful update also refreshes
/// the display name held in the session.
pub async fn update_profile<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<UpdateProfileRequest>,
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

    if let Err(error) = resume_identity(&req, &state, &ctx).await {
        return flow_error_response(&error, LOGIN_PATH);
    }

    let profile = Profile {
        full_name: request.full_name.clone(),
        email: request.email.clone(),
    };

    match state.flow.update_profile(&ctx, &profile).await {
        Ok(()) => apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(
            serde_json::json!({
                "message": "Profile updated."
            }),
        ),
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}

/// Handler for POST /profile/change-password
pub async fn change_password<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
    request: web::Json<ChangePasswordRequest>,
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

    if let Err(error) = resume_identity(&req, &state, &ctx).await {
        return flow_error_response(&error, LOGIN_PATH);
    }

    match state
        .flow
        .change_password(&ctx, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(
            serde_json::json!({
                "message": "Password changed."
            }),
        ),
        Err(error) => flow_error_response(&error, LOGIN_PATH),
    }
}
