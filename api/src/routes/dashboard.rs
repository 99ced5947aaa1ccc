use actix_web::{web, HttpRequest, HttpResponse};

use hrms_core::{BotVerifier, FlowError, IdentityClient, SessionStore};

use crate::dto::auth_dto::SessionResponse;
use crate::handlers::error::{flow_error_response, see_other, LOGIN_PATH};
use crate::session::{apply_session_cookie, bind_session};

use super::auth::AppState;
use super::resume_identity;

/// Handler for GET /dashboard
///
/// The guarded landing endpoint. A session without a token but with a
/// valid signed identity cookie is rehydrated first (the remember-me
/// path); anything still unauthenticated goes to the login form.
pub async fn dashboard<I, B, S>(
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

    match ctx.auth_session().await {
        Ok(Some(session)) => apply_session_cookie(&mut HttpResponse::Ok(), new_cookie).json(
            SessionResponse {
                full_name: session.full_name,
                email: session.email,
            },
        ),
        Ok(None) => see_other(LOGIN_PATH),
        Err(error) => flow_error_response(&FlowError::from(error), LOGIN_PATH),
    }
}
