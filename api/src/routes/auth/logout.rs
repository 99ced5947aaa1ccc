use actix_web::{web, HttpRequest, HttpResponse};

use hrms_core::{BotVerifier, IdentityClient, SessionStore};

use crate::handlers::error::{flow_error_response, LOGIN_PATH};
use crate::session::{bind_session, removal_cookie, LEGACY_COOKIES};

use super::AppState;

/// Handler for GET and POST /auth/logout
///
/// Clears every server-side session entry and instructs the browser to
/// delete the signed identity cookie plus the plain cookies set by the
/// legacy release. Idempotent: logging out twice is not an error. The GET
/// route exists for plain logout links; both verbs behave identically.
pub async fn logout<I, B, S>(
    req: HttpRequest,
    state: web::Data<AppState<I, B, S>>,
) -> HttpResponse
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    let (ctx, _) = bind_session(&req, &state.sessions, &state.session_config);

    if let Err(error) = state.flow.logout(&ctx).await {
        return flow_error_response(&error, LOGIN_PATH);
    }

    let mut builder = HttpResponse::SeeOther();
    builder.insert_header(("Location", LOGIN_PATH));
    builder.cookie(removal_cookie(&state.session_config.identity_cookie_name));
    for name in LEGACY_COOKIES {
        builder.cookie(removal_cookie(name));
    }
    builder.finish()
}
