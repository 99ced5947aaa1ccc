//! End-to-end handler tests over the full HTTP surface
//!
//! Runs the real application factory against an in-memory session store,
//! a scripted identity client, and a stub verifier.

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use async_trait::async_trait;
use std::sync::Arc;

use hrms_api::app::create_app;
use hrms_api::routes::AppState;
use hrms_core::clients::identity::{
    ApiOutcome, AuthResponse, IdentityClient, IdentityError, LoginAck, Profile, RegisterRequest,
};
use hrms_core::domain::VerificationResult;
use hrms_core::{
    AuthFlowConfig, AuthFlowService, BotCheckConfig, BotCheckService, BotVerifier,
    IdentityCookieCodec,
};
use hrms_infra::InMemorySessionStore;
use shared::config::SessionConfig;

const SIGNING_SECRET: &str = "handler-test-secret";

/// Identity client answering every endpoint with a canned outcome
struct StubIdentity {
    register: ApiOutcome<()>,
    login: ApiOutcome<LoginAck>,
    verify_register: ApiOutcome<()>,
    verify_login: ApiOutcome<AuthResponse>,
}

impl Default for StubIdentity {
    fn default() -> Self {
        Self {
            register: ApiOutcome::Success(()),
            login: ApiOutcome::Success(LoginAck::default()),
            verify_register: ApiOutcome::Success(()),
            verify_login: ApiOutcome::Success(AuthResponse {
                token: "bearer-xyz".to_string(),
                email: "ada@example.com".to_string(),
                full_name: "Ada Lovelace".to_string(),
                expiration: None,
            }),
        }
    }
}

#[async_trait]
impl IdentityClient for StubIdentity {
    async fn register(&self, _request: &RegisterRequest) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(self.register.clone())
    }

    async fn login(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<ApiOutcome<LoginAck>, IdentityError> {
        Ok(self.login.clone())
    }

    async fn verify_register_otp(
        &self,
        _email: &str,
        _otp: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(self.verify_register.clone())
    }

    async fn verify_login_otp(
        &self,
        _email: &str,
        _otp: &str,
        _remember_me: bool,
    ) -> Result<ApiOutcome<AuthResponse>, IdentityError> {
        Ok(self.verify_login.clone())
    }

    async fn change_password(
        &self,
        _bearer: &str,
        _old_password: &str,
        _new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(ApiOutcome::Success(()))
    }

    async fn forgot_password(&self, _email: &str) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(ApiOutcome::Success(()))
    }

    async fn reset_password(
        &self,
        _token: &str,
        _email: &str,
        _new_password: &str,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(ApiOutcome::Success(()))
    }

    async fn fetch_profile(&self, _bearer: &str) -> Result<ApiOutcome<Profile>, IdentityError> {
        Ok(ApiOutcome::Success(Profile {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }))
    }

    async fn update_profile(
        &self,
        _bearer: &str,
        _profile: &Profile,
    ) -> Result<ApiOutcome<()>, IdentityError> {
        Ok(ApiOutcome::Success(()))
    }
}

struct AcceptingVerifier;

#[async_trait]
impl BotVerifier for AcceptingVerifier {
    async fn verify(&self, _token: &str) -> VerificationResult {
        VerificationResult::accepted(Some(0.9))
    }
}

fn test_state(
    identity: StubIdentity,
) -> web::Data<AppState<StubIdentity, AcceptingVerifier, InMemorySessionStore>> {
    let session_config = SessionConfig {
        cookie_signing_secret: SIGNING_SECRET.to_string(),
        ..Default::default()
    };
    let bot_check = BotCheckService::new(Arc::new(AcceptingVerifier), BotCheckConfig::default());
    let cookie_codec = IdentityCookieCodec::new(
        SIGNING_SECRET,
        session_config.identity_cookie_lifetime_seconds,
    );
    let flow = Arc::new(AuthFlowService::new(
        Arc::new(identity),
        bot_check,
        cookie_codec,
        AuthFlowConfig::default(),
    ));

    web::Data::new(AppState {
        flow,
        sessions: Arc::new(InMemorySessionStore::new()),
        session_config,
        recaptcha_site_key: "site-key-123".to_string(),
    })
}

fn login_body() -> serde_json::Value {
    serde_json::json!({
        "email": "ada@example.com",
        "password": "secret1",
        "remember_me": false,
        "g-recaptcha-response": "tok"
    })
}

fn response_cookie<B>(
    resp: &actix_web::dev::ServiceResponse<B>,
    name: &str,
) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_rt::test]
async fn health_endpoint_responds() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn login_form_mints_a_session_cookie_and_carries_the_site_key() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/auth/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(response_cookie(&resp, "hrms_session").is_some());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["form"], "login");
    assert_eq!(body["recaptcha_site_key"], "site-key-123");
}

#[actix_rt::test]
async fn accepted_credentials_redirect_to_the_otp_entry() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(login_body())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login/verify-otp");
    assert!(response_cookie(&resp, "hrms_session").is_some());
}

#[actix_rt::test]
async fn otp_entry_without_a_pending_flow_redirects_to_login() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/login/verify-otp")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/verify-otp")
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

#[actix_rt::test]
async fn full_login_flow_reaches_the_dashboard() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(login_body())
            .to_request(),
    )
    .await;
    let session_cookie = response_cookie(&resp, "hrms_session").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/verify-otp")
            .cookie(session_cookie.clone())
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
    // remember_me was off, so no identity cookie
    assert!(response_cookie(&resp, "hrms_identity").is_none());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["full_name"], "Ada Lovelace");
    assert_eq!(body["email"], "ada@example.com");
}

#[actix_rt::test]
async fn remember_me_sets_the_signed_identity_cookie() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let mut body = login_body();
    body["remember_me"] = serde_json::json!(true);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(body)
            .to_request(),
    )
    .await;
    let session_cookie = response_cookie(&resp, "hrms_session").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/verify-otp")
            .cookie(session_cookie)
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let identity = response_cookie(&resp, "hrms_identity").unwrap();
    assert_eq!(identity.http_only(), Some(true));

    // The cookie value decodes under the configured secret
    let codec = IdentityCookieCodec::new(SIGNING_SECRET, 604800);
    let claims = codec.decode(identity.value()).unwrap();
    assert_eq!(claims.email, "ada@example.com");
    assert_eq!(claims.token, "bearer-xyz");
}

#[actix_rt::test]
async fn identity_cookie_rehydrates_a_fresh_session_on_the_dashboard() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let codec = IdentityCookieCodec::new(SIGNING_SECRET, 604800);
    let session = hrms_core::AuthenticatedSession::new("bearer-xyz", "Ada Lovelace", "ada@example.com");
    let cookie_value = codec.encode(&session).unwrap();

    // No session cookie at all: the identity cookie alone must authenticate
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(Cookie::new("hrms_identity", cookie_value))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["full_name"], "Ada Lovelace");
}

#[actix_rt::test]
async fn identity_cookie_rehydrates_a_fresh_session_on_the_profile_page() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let codec = IdentityCookieCodec::new(SIGNING_SECRET, 604800);
    let session =
        hrms_core::AuthenticatedSession::new("bearer-xyz", "Ada Lovelace", "ada@example.com");
    let cookie_value = codec.encode(&session).unwrap();

    // A remember-me browser restart may land on any guarded endpoint first
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/profile")
            .cookie(Cookie::new("hrms_identity", cookie_value))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ada@example.com");
}

#[actix_rt::test]
async fn dashboard_without_any_credentials_redirects_to_login() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

#[actix_rt::test]
async fn logout_clears_the_session_and_expires_the_cookies() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    // Establish a session first
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(login_body())
            .to_request(),
    )
    .await;
    let session_cookie = response_cookie(&resp, "hrms_session").unwrap();

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/verify-otp")
            .cookie(session_cookie.clone())
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/logout")
            .cookie(session_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");

    // Both the signed cookie and the legacy plain cookies are expired
    for name in ["hrms_identity", "RememberMe_Email", "RememberMe_Username"] {
        let cookie = response_cookie(&resp, name).unwrap();
        assert_eq!(cookie.value(), "");
    }

    // The server-side session is gone
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/dashboard")
            .cookie(session_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_rt::test]
async fn logout_link_works_over_get() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/auth/logout").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
    assert!(response_cookie(&resp, "hrms_identity").is_some());
}

#[actix_rt::test]
async fn reset_password_form_lists_its_fields() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/reset-password")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["form"], "reset_password");
    assert_eq!(body["action"], "/auth/reset-password");
    assert_eq!(body["fields"], serde_json::json!(["token", "email", "new_password"]));
}

#[actix_rt::test]
async fn upstream_registration_rejection_is_unprocessable() {
    let identity = StubIdentity {
        register: ApiOutcome::Rejected {
            message: "email already registered".to_string(),
        },
        ..Default::default()
    };
    let app = test::init_service(create_app(test_state(identity))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "full_name": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "secret1",
                "confirm_password": "secret1",
                "g-recaptcha-response": "tok"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "registration_rejected");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("email already registered"));
}

#[actix_rt::test]
async fn register_flow_parks_and_verifies() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(serde_json::json!({
                "full_name": "Ada Lovelace",
                "email": "ada@example.com",
                "password": "secret1",
                "confirm_password": "secret1",
                "g-recaptcha-response": "tok"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/register/verify-otp");
    let session_cookie = response_cookie(&resp, "hrms_session").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register/verify-otp")
            .cookie(session_cookie)
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

#[actix_rt::test]
async fn rejected_otp_is_unauthorized_and_retryable() {
    let identity = StubIdentity {
        verify_login: ApiOutcome::Rejected {
            message: "wrong otp".to_string(),
        },
        ..Default::default()
    };
    let app = test::init_service(create_app(test_state(identity))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(login_body())
            .to_request(),
    )
    .await;
    let session_cookie = response_cookie(&resp, "hrms_session").unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login/verify-otp")
            .cookie(session_cookie.clone())
            .set_json(serde_json::json!({"otp": "123456"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The pending flow survives, so the OTP entry is still reachable
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/login/verify-otp")
            .cookie(session_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn malformed_input_is_a_validation_error() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(serde_json::json!({
                "email": "not-an-email",
                "password": "secret1",
                "g-recaptcha-response": "tok"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_error");
}

#[actix_rt::test]
async fn profile_requires_an_authenticated_session() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/profile").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

#[actix_rt::test]
async fn unknown_routes_are_not_found() {
    let app = test::init_service(create_app(test_state(StubIdentity::default()))).await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
