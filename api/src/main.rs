use actix_web::{web, HttpServer};
use log::info;
use std::sync::Arc;
use std::time::Duration;

use hrms_api::app::create_app;
use hrms_api::config::AppConfig;
use hrms_api::routes::AppState;
use hrms_core::{AuthFlowService, BotCheckConfig, BotCheckService, IdentityCookieCodec};
use hrms_infra::cache::{CacheConfig, RedisClient};
use hrms_infra::{HttpIdentityClient, RecaptchaVerifier, RedisSessionStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting HRMS gateway");

    let config = AppConfig::from_env();
    if config.session.cookie_signing_secret.is_empty() {
        anyhow::bail!("COOKIE_SIGNING_SECRET must be set");
    }

    // Session store
    let redis_client = RedisClient::new(CacheConfig::from_env()).await?;
    let sessions = Arc::new(RedisSessionStore::new(redis_client, &config.session));

    // External services
    let identity = Arc::new(HttpIdentityClient::new(config.identity_api.clone())?);
    let verifier = Arc::new(RecaptchaVerifier::new(config.recaptcha.clone())?);
    let bot_check = BotCheckService::new(
        verifier,
        BotCheckConfig {
            score_threshold: config.recaptcha.score_threshold,
        },
    );

    // Flow orchestrator
    let cookie_codec = IdentityCookieCodec::new(
        &config.session.cookie_signing_secret,
        config.session.identity_cookie_lifetime_seconds,
    );
    let flow = Arc::new(AuthFlowService::new(
        identity,
        bot_check,
        cookie_codec,
        config.flow.clone(),
    ));

    let state = web::Data::new(AppState {
        flow,
        sessions,
        session_config: config.session.clone(),
        recaptcha_site_key: config.recaptcha.site_key.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(Duration::from_secs(config.server.keep_alive))
        .bind(&bind_address)?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.run().await?;

    Ok(())
}
