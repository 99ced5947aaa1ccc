//! Application factory
//!
//! Builds the actix-web application with all routes wired to a shared
//! [`AppState`]. Generic over the core traits so integration tests can run
//! the full HTTP surface against in-memory fakes.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use hrms_core::{BotVerifier, IdentityClient, SessionStore};

use crate::routes::auth::{login, logout, password, register, AppState};
use crate::routes::{dashboard, profile};

/// Create and configure the application
pub fn create_app<I, B, S>(
    app_state: web::Data<AppState<I, B, S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    I: IdentityClient + 'static,
    B: BotVerifier + 'static,
    S: SessionStore + 'static,
{
    App::new()
        .app_data(app_state)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // Authentication flows
        .service(
            web::scope("/auth")
                .route("/register", web::get().to(register::show_register::<I, B, S>))
                .route("/register", web::post().to(register::submit_register::<I, B, S>))
                .route(
                    "/register/verify-otp",
                    web::get().to(register::show_register_otp::<I, B, S>),
                )
                .route(
                    "/register/verify-otp",
                    web::post().to(register::submit_register_otp::<I, B, S>),
                )
                .route("/login", web::get().to(login::show_login::<I, B, S>))
                .route("/login", web::post().to(login::submit_login::<I, B, S>))
                .route(
                    "/login/verify-otp",
                    web::get().to(login::show_login_otp::<I, B, S>),
                )
                .route(
                    "/login/verify-otp",
                    web::post().to(login::submit_login_otp::<I, B, S>),
                )
                .route("/logout", web::get().to(logout::logout::<I, B, S>))
                .route("/logout", web::post().to(logout::logout::<I, B, S>))
                .route(
                    "/forgot-password",
                    web::get().to(password::show_forgot_password),
                )
                .route(
                    "/forgot-password",
                    web::post().to(password::submit_forgot_password::<I, B, S>),
                )
                .route(
                    "/reset-password",
                    web::get().to(password::show_reset_password),
                )
                .route(
                    "/reset-password",
                    web::post().to(password::submit_reset_password::<I, B, S>),
                ),
        )
        // Authenticated area
        .route("/dashboard", web::get().to(dashboard::dashboard::<I, B, S>))
        .route("/profile", web::get().to(profile::show_profile::<I, B, S>))
        .route("/profile", web::put().to(profile::update_profile::<I, B, S>))
        .route(
            "/profile/change-password",
            web::post().to(profile::change_password::<I, B, S>),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "hrms-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
