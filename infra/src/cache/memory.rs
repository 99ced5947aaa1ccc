//! In-memory session store
//!
//! Process-local store for tests and development. Sessions never expire;
//! production deployments use [`super::RedisSessionStore`] instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use hrms_core::errors::SessionError;
use hrms_core::services::session::SessionStore;

/// Session store holding all sessions in a process-local map
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> SessionError {
        SessionError::Store("session store lock poisoned".to_string())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str, field: &str) -> Result<Option<String>, SessionError> {
        let sessions = self.sessions.read().map_err(|_| Self::poisoned())?;
        Ok(sessions
            .get(session_id)
            .and_then(|session| session.get(field))
            .cloned())
    }

    async fn set(&self, session_id: &str, field: &str, value: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| Self::poisoned())?;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, session_id: &str, field: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| Self::poisoned())?;
        if let Some(session) = sessions.get_mut(session_id) {
            session.remove(field);
        }
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().map_err(|_| Self::poisoned())?;
        sessions.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        store.set("s1", "token", "abc").await.unwrap();

        assert_eq!(
            store.get("s1", "token").await.unwrap(),
            Some("abc".to_string())
        );
        assert_eq!(store.get("s1", "missing").await.unwrap(), None);
        assert_eq!(store.get("other", "token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_deletes_a_single_field() {
        let store = InMemorySessionStore::new();
        store.set("s1", "token", "abc").await.unwrap();
        store.set("s1", "email", "a@b.com").await.unwrap();

        store.remove("s1", "token").await.unwrap();

        assert_eq!(store.get("s1", "token").await.unwrap(), None);
        assert_eq!(
            store.get("s1", "email").await.unwrap(),
            Some("a@b.com".to_string())
        );
    }

    #[tokio::test]
    async fn clear_drops_the_whole_session() {
        let store = InMemorySessionStore::new();
        store.set("s1", "token", "abc").await.unwrap();
        store.set("s2", "token", "def").await.unwrap();

        store.clear("s1").await.unwrap();

        assert_eq!(store.get("s1", "token").await.unwrap(), None);
        assert_eq!(
            store.get("s2", "token").await.unwrap(),
            Some("def".to_string())
        );
    }

    #[tokio::test]
    async fn clearing_an_unknown_session_is_a_no_op() {
        let store = InMemorySessionStore::new();
        store.clear("ghost").await.unwrap();
    }
}
