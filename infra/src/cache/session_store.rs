//! Redis-backed session store
//!
//! Each browser session is one Redis hash under `session:{id}`. The hash TTL
//! is refreshed on every read and write, so a session expires only after the
//! configured idle period without traffic.

use async_trait::async_trait;
use tracing::debug;

use hrms_core::errors::SessionError;
use hrms_core::services::session::SessionStore;
use shared::config::SessionConfig;

use super::redis_client::RedisClient;

const SESSION_KEY_PREFIX: &str = "session:";

/// Session store backed by Redis hashes with sliding expiration
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    idle_timeout_seconds: u64,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient, config: &SessionConfig) -> Self {
        Self {
            client,
            idle_timeout_seconds: config.idle_timeout_seconds,
        }
    }

    fn session_key(session_id: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, session_id)
    }

    async fn touch(&self, key: &str) -> Result<(), SessionError> {
        self.client
            .expire(key, self.idle_timeout_seconds)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, session_id: &str, field: &str) -> Result<Option<String>, SessionError> {
        let key = Self::session_key(session_id);
        let value = self
            .client
            .hash_get(&key, field)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;

        // Sliding expiration: any read keeps the session alive
        if value.is_some() {
            self.touch(&key).await?;
        }
        Ok(value)
    }

    async fn set(&self, session_id: &str, field: &str, value: &str) -> Result<(), SessionError> {
        let key = Self::session_key(session_id);
        self.client
            .hash_set(&key, field, value)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))?;
        self.touch(&key).await
    }

    async fn remove(&self, session_id: &str, field: &str) -> Result<(), SessionError> {
        let key = Self::session_key(session_id);
        self.client
            .hash_remove(&key, field)
            .await
            .map_err(|e| SessionError::Store(e.to_string()))
    }

    async fn clear(&self, session_id: &str) -> Result<(), SessionError> {
        let key = Self::session_key(session_id);
        debug!("Clearing session '{}'", session_id);
        self.client
            .delete(&key)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Store(e.to_string()))
    }
}
