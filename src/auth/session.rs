//! Token sessions.
//!
//! A session maps an opaque bearer token to a user id for a fixed time.
//! There is no idle timeout and no refresh: once `ttl` has passed since
//! login, the token stops resolving.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::file::ObjectId;
use crate::Result;

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Token → user mapping with expiry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for `user_id` and return its token.
    async fn create(&self, user_id: &ObjectId) -> Result<String>;

    /// User behind `token`, if the session exists and has not expired.
    async fn resolve(&self, token: &str) -> Result<Option<ObjectId>>;

    /// Close the session. Returns whether it existed.
    async fn revoke(&self, token: &str) -> Result<bool>;

    /// Drop expired sessions. Returns how many were removed.
    async fn purge_expired(&self) -> Result<usize>;

    /// Whether the store is reachable.
    async fn is_alive(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
struct Session {
    user_id: ObjectId,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// In-process [`SessionStore`].
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }
}

impl MemorySessionStore {
    /// Create a store whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(36_500)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: &ObjectId) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.sessions.write().await.insert(
            token.clone(),
            Session {
                user_id: user_id.clone(),
                expires_at,
            },
        );

        info!(user_id = %user_id, "Session created");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<ObjectId>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|s| !s.is_expired(Utc::now()))
            .map(|s| s.user_id.clone()))
    }

    async fn revoke(&self, token: &str) -> Result<bool> {
        let removed = self.sessions.write().await.remove(token);
        if let Some(session) = &removed {
            info!(user_id = %session.user_id, "Session revoked");
        }
        Ok(removed.is_some())
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!("Purged {} expired sessions", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> ObjectId {
        ObjectId::from_sequence(1)
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let store = MemorySessionStore::default();

        let token = store.create(&user()).await.unwrap();
        assert_eq!(store.resolve(&token).await.unwrap(), Some(user()));
        assert_eq!(store.resolve("unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = MemorySessionStore::default();

        let a = store.create(&user()).await.unwrap();
        let b = store.create(&user()).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.resolve(&a).await.unwrap(), Some(user()));
        assert_eq!(store.resolve(&b).await.unwrap(), Some(user()));
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = MemorySessionStore::default();
        let token = store.create(&user()).await.unwrap();

        assert!(store.revoke(&token).await.unwrap());
        assert!(!store.revoke(&token).await.unwrap());
        assert_eq!(store.resolve(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_sessions() {
        let store = MemorySessionStore::new(Duration::ZERO);
        let token = store.create(&user()).await.unwrap();

        assert_eq!(store.resolve(&token).await.unwrap(), None);
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.purge_expired().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_keeps_live_sessions() {
        let store = MemorySessionStore::default();
        let token = store.create(&user()).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 0);
        assert_eq!(store.resolve(&token).await.unwrap(), Some(user()));
    }
}
