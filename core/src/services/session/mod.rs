//! Session store trait and the typed per-request session context
//!
//! The store is process-external and keyed by an opaque per-browser
//! session identifier. Handlers never reach for an ambient session:
//! they receive an explicit `SessionContext` built from the request's
//! session-id cookie, and the flow service talks only to that context.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{AuthenticatedSession, PendingAuthFlow};
use crate::errors::SessionError;

/// Session field holding the serialized pending flow
pub const PENDING_FLOW_FIELD: &str = "pending_flow";
/// Session field holding the bearer token
pub const TOKEN_FIELD: &str = "token";
/// Session field holding the display name
pub const USERNAME_FIELD: &str = "username";
/// Session field holding the authenticated email
pub const EMAIL_FIELD: &str = "email";

/// Key/value store scoped by session identifier.
///
/// Implementations own expiry: entries of a session disappear together
/// after the configured idle timeout. No cross-session visibility.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, field: &str) -> Result<Option<String>, SessionError>;
    async fn set(&self, session_id: &str, field: &str, value: &str) -> Result<(), SessionError>;
    async fn remove(&self, session_id: &str, field: &str) -> Result<(), SessionError>;
    async fn clear(&self, session_id: &str) -> Result<(), SessionError>;
}

/// Typed view over one browser's session.
///
/// Wraps the store plus the session id extracted from the request so flow
/// code reads and writes domain types, not raw fields.
#[derive(Clone)]
pub struct SessionContext<S: SessionStore> {
    store: Arc<S>,
    session_id: String,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: Arc<S>, session_id: impl Into<String>) -> Self {
        Self {
            store,
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The pending flow, if a credential step has completed and an OTP is
    /// outstanding
    pub async fn pending_flow(&self) -> Result<Option<PendingAuthFlow>, SessionError> {
        match self.store.get(&self.session_id, PENDING_FLOW_FIELD).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Park a pending flow, replacing any abandoned one
    pub async fn set_pending_flow(&self, flow: &PendingAuthFlow) -> Result<(), SessionError> {
        let raw = serde_json::to_string(flow)?;
        self.store
            .set(&self.session_id, PENDING_FLOW_FIELD, &raw)
            .await
    }

    pub async fn clear_pending_flow(&self) -> Result<(), SessionError> {
        self.store.remove(&self.session_id, PENDING_FLOW_FIELD).await
    }

    /// The bearer token, when this session is authenticated
    pub async fn token(&self) -> Result<Option<String>, SessionError> {
        self.store.get(&self.session_id, TOKEN_FIELD).await
    }

    /// The full authenticated identity, when every field is present
    pub async fn auth_session(&self) -> Result<Option<AuthenticatedSession>, SessionError> {
        let token = self.store.get(&self.session_id, TOKEN_FIELD).await?;
        let username = self.store.get(&self.session_id, USERNAME_FIELD).await?;
        let email = self.store.get(&self.session_id, EMAIL_FIELD).await?;
        match (token, username, email) {
            (Some(token), Some(username), Some(email)) => {
                Ok(Some(AuthenticatedSession::new(token, username, email)))
            }
            _ => Ok(None),
        }
    }

    /// Establish the authenticated identity for this session
    pub async fn set_auth_session(
        &self,
        session: &AuthenticatedSession,
    ) -> Result<(), SessionError> {
        self.store
            .set(&self.session_id, TOKEN_FIELD, &session.token)
            .await?;
        self.store
            .set(&self.session_id, USERNAME_FIELD, &session.full_name)
            .await?;
        self.store
            .set(&self.session_id, EMAIL_FIELD, &session.email)
            .await
    }

    /// Refresh the stored display name after a profile update
    pub async fn set_username(&self, full_name: &str) -> Result<(), SessionError> {
        self.store
            .set(&self.session_id, USERNAME_FIELD, full_name)
            .await
    }

    /// Drop every entry of this session
    pub async fn clear(&self) -> Result<(), SessionError> {
        self.store.clear(&self.session_id).await
    }
}
