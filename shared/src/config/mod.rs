//! Configuration modules for the gateway
//!
//! Each concern gets its own config struct with a `from_env()` constructor
//! so the binary can assemble its configuration from environment variables.

pub mod identity_api;
pub mod recaptcha;
pub mod server;
pub mod session;

pub use identity_api::IdentityApiConfig;
pub use recaptcha::RecaptchaConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
