//! Route handlers

pub mod auth;
pub mod dashboard;
pub mod profile;

pub use auth::AppState;

use actix_web::HttpRequest;

use hrms_core::{BotVerifier, FlowError, IdentityClient, SessionContext, SessionStore};

/// Rehydrate the session from the signed identity cookie, when present
///
/// Every authenticated-area entry runs this before consulting the session,
/// so a remember-me user is recognized whichever guarded endpoint their
/// browser hits first. A missing or invalid cookie is not an error.
pub(crate) async fn resume_identity<I, B, S>(
    req: &HttpRequest,
    state: &AppState<I, B, S>,
    ctx: &SessionContext<S>,
) -> Result<(), FlowError>
where
    I: IdentityClient,
    B: BotVerifier,
    S: SessionStore,
{
    match req.cookie(&state.session_config.identity_cookie_name) {
        Some(cookie) => state
            .flow
            .resume_from_cookie(ctx, cookie.value())
            .await
            .map(|_| ()),
        None => Ok(()),
    }
}
