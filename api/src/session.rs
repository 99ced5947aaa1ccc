//! Session-id and identity cookie management
//!
//! The session-id cookie is an opaque UUID minted on first touch; all user
//! state lives server-side under that id. The identity cookie is the signed
//! "remember me" token produced by the core codec. Logout also clears the
//! plain legacy cookies an earlier release of the product set.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponseBuilder};
use std::sync::Arc;
use uuid::Uuid;

use hrms_core::{SessionContext, SessionStore};
use shared::config::SessionConfig;

/// Plain cookies set by the legacy release; deleted on logout
pub const LEGACY_COOKIES: [&str; 2] = ["RememberMe_Email", "RememberMe_Username"];

/// The request's session context plus, on first touch, the session-id
/// cookie the response must set.
pub fn bind_session<S: SessionStore>(
    req: &HttpRequest,
    store: &Arc<S>,
    config: &SessionConfig,
) -> (SessionContext<S>, Option<Cookie<'static>>) {
    match req.cookie(&config.session_cookie_name) {
        Some(cookie) => (SessionContext::new(Arc::clone(store), cookie.value()), None),
        None => {
            let session_id = Uuid::new_v4().to_string();
            let cookie = Cookie::build(config.session_cookie_name.clone(), session_id.clone())
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish();
            (SessionContext::new(Arc::clone(store), session_id), Some(cookie))
        }
    }
}

/// The signed persistent identity cookie, living as long as the codec's
/// claims do
pub fn identity_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    Cookie::build(config.identity_cookie_name.clone(), value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(actix_web::cookie::time::Duration::seconds(
            config.identity_cookie_lifetime_seconds as i64,
        ))
        .finish()
}

/// A cookie that instructs the browser to delete the named cookie
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// Attach the freshly minted session-id cookie, when there is one
pub fn apply_session_cookie<'a>(
    builder: &'a mut HttpResponseBuilder,
    cookie: Option<Cookie<'static>>,
) -> &'a mut HttpResponseBuilder {
    if let Some(cookie) = cookie {
        builder.cookie(cookie);
    }
    builder
}
