use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// An authenticated admin session. The dashboard never hands the backend
/// token to the browser; the SPA holds the opaque session id instead.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub backend_token: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_validated: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > ttl
    }

    pub fn needs_revalidation(&self, after: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_validated > after
    }
}

/// In-memory session map. A restart evicts every session; the SPA sees a
/// 401 and goes through a normal re-login.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
    revalidate_after: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: i64, revalidate_secs: i64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::seconds(ttl_secs),
            revalidate_after: Duration::seconds(revalidate_secs),
        }
    }

    pub async fn insert(&self, backend_token: String, username: String) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            backend_token,
            username,
            created_at: now,
            last_validated: now,
        };
        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Look a session up by id, evicting it if past its TTL.
    pub async fn resolve(&self, id: Uuid) -> Option<Session> {
        let now = Utc::now();
        let mut sessions = self.inner.write().await;
        match sessions.get(&id) {
            Some(session) if session.is_expired(self.ttl, now) => {
                sessions.remove(&id);
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }

    pub async fn mark_validated(&self, id: Uuid) {
        if let Some(session) = self.inner.write().await.get_mut(&id) {
            session.last_validated = Utc::now();
        }
    }

    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.inner.write().await.remove(&id)
    }

    pub fn needs_revalidation(&self, session: &Session) -> bool {
        session.needs_revalidation(self.revalidate_after, Utc::now())
    }
}
