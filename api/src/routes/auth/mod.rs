//! Authentication route handlers
//!
//! The registration and login flows (credentials, then OTP), logout, and
//! the password-reset endpoints.

pub mod login;
pub mod logout;
pub mod password;
pub mod register;

use std::sync::Arc;

use hrms_core::{AuthFlowService, BotVerifier, IdentityClient, SessionStore};
use shared::config::SessionConfig;

/// Application state shared by every handler
pub struct AppState<I, B, S>
where
    I: IdentityClient,
    B: BotVerifier,
    S: SessionStore,
{
    pub flow: Arc<AuthFlowService<I, B>>,
    pub sessions: Arc<S>,
    pub session_config: SessionConfig,
    /// Site key the browser widget needs; empty when the bot gate is off
    pub recaptcha_site_key: String,
}

impl<I, B, S> AppState<I, B, S>
where
    I: IdentityClient,
    B: BotVerifier,
    S: SessionStore,
{
    /// The site key as handed to form descriptors
    pub fn site_key(&self) -> Option<String> {
        if self.recaptcha_site_key.is_empty() {
            None
        } else {
            Some(self.recaptcha_site_key.clone())
        }
    }
}
