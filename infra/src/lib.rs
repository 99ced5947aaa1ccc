//! # Infrastructure Layer
//!
//! Concrete implementations of the core layer's traits, following Clean
//! Architecture principles:
//!
//! - **Cache**: Redis-backed session store, plus an in-memory store for
//!   tests and development
//! - **HTTP**: identity API client over reqwest
//! - **Verify**: external bot-verification (reCAPTCHA siteverify) caller

use thiserror::Error;

pub mod cache;
pub mod http;
pub mod verify;

pub use cache::{InMemorySessionStore, RedisSessionStore};
pub use http::HttpIdentityClient;
pub use verify::RecaptchaVerifier;

/// Errors raised while constructing or operating infrastructure services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
