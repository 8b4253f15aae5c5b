//! In-Memory Coach Session Store
//!
//! Keeps coach sessions in a map guarded by an async lock. Sessions idle for
//! longer than the retention TTL are evicted on insert, and the map never
//! holds more than `max_sessions`; when full, the least recently touched
//! session makes room.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::ports::{CoachSessionStore, StoreError};

/// How long idle sessions are kept, and how many at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRetention {
    pub idle_ttl: Duration,
    pub max_sessions: usize,
}

impl Default for SessionRetention {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(60 * 60),
            max_sessions: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    session: CoachSession,
    touched: Instant,
}

impl Entry {
    fn new(session: CoachSession) -> Self {
        Self {
            session,
            touched: Instant::now(),
        }
    }
}

/// In-memory storage for coach sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCoachSessionStore {
    sessions: Arc<RwLock<HashMap<CoachSessionId, Entry>>>,
    retention: SessionRetention,
}

impl InMemoryCoachSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_retention(mut self, retention: SessionRetention) -> Self {
        self.retention = retention;
        self
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Clear all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Drops idle sessions, then the stalest ones until one more fits.
    fn make_room(&self, sessions: &mut HashMap<CoachSessionId, Entry>) {
        let before = sessions.len();
        let ttl = self.retention.idle_ttl;
        sessions.retain(|_, entry| entry.touched.elapsed() <= ttl);

        while !sessions.is_empty() && sessions.len() >= self.retention.max_sessions {
            let stalest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(id, _)| *id);
            match stalest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted coach sessions");
        }
    }
}

#[async_trait]
impl CoachSessionStore for InMemoryCoachSessionStore {
    async fn insert(&self, session: &CoachSession) -> Result<CoachSession, StoreError> {
        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions.get(session.id()) {
            return Err(StoreError::VersionConflict {
                id: *session.id(),
                attempted: session.version(),
                current: existing.session.version(),
            });
        }
        self.make_room(&mut sessions);

        let saved = session.with_next_version();
        sessions.insert(*saved.id(), Entry::new(saved.clone()));
        Ok(saved)
    }

    async fn save(&self, session: &CoachSession) -> Result<CoachSession, StoreError> {
        let mut sessions = self.sessions.write().await;
        let current = sessions
            .get(session.id())
            .map(|stored| stored.session.version())
            .ok_or(StoreError::NotFound(*session.id()))?;

        if current != session.version() {
            return Err(StoreError::VersionConflict {
                id: *session.id(),
                attempted: session.version(),
                current,
            });
        }

        let saved = session.with_next_version();
        sessions.insert(*saved.id(), Entry::new(saved.clone()));
        Ok(saved)
    }

    async fn load(&self, id: &CoachSessionId) -> Result<CoachSession, StoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .map(|entry| entry.session.clone())
            .ok_or(StoreError::NotFound(*id))
    }
}
