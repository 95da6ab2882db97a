//! SessionManager: concurrent per-session access via DashMap.

use std::sync::{Arc, RwLock};

use chrono::{Duration, Utc};
use cortex_core::errors::{CortexError, CortexResult};
use cortex_core::models::SessionContext;
use cortex_core::traits::ISessionTracker;
use dashmap::DashMap;
use tracing::debug;

use crate::efficiency::TokenEfficiency;

#[derive(Debug, Clone)]
struct SessionEntry {
    context: SessionContext,
    efficiency: TokenEfficiency,
}

/// Thread-safe session manager. One session at a time is active; retrieval
/// deduplicates against it.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, SessionEntry>>,
    active: RwLock<Option<String>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session and make it active. Returns its id.
    pub fn create_session(&self, session_id: impl Into<String>) -> CortexResult<String> {
        let session_id = session_id.into();
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                context: SessionContext::new(session_id.clone()),
                efficiency: TokenEfficiency::default(),
            },
        );
        self.set_active(Some(session_id.clone()))?;
        debug!(session_id = %session_id, "session created");
        Ok(session_id)
    }

    /// Make an existing session the active one.
    pub fn activate(&self, session_id: &str) -> CortexResult<()> {
        if !self.sessions.contains_key(session_id) {
            return Err(CortexError::SessionNotFound {
                id: session_id.to_string(),
            });
        }
        self.set_active(Some(session_id.to_string()))
    }

    /// Remove a session, deactivating it if it was active.
    pub fn end_session(&self, session_id: &str) -> CortexResult<Option<SessionContext>> {
        let removed = self.sessions.remove(session_id).map(|(_, e)| e.context);
        if self.active_session_id()?.as_deref() == Some(session_id) {
            self.set_active(None)?;
        }
        Ok(removed)
    }

    /// Cloned snapshot of a session.
    pub fn get_session(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.get(session_id).map(|e| e.context.clone())
    }

    pub fn active_session_id(&self) -> CortexResult<Option<String>> {
        let active = self
            .active
            .read()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        Ok(active.clone())
    }

    pub fn efficiency(&self, session_id: &str) -> Option<TokenEfficiency> {
        self.sessions.get(session_id).map(|e| e.efficiency)
    }

    pub fn record_query(&self, session_id: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut entry) => {
                entry.context.queries_made += 1;
                entry.context.last_activity = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns how many were removed.
    pub fn cleanup_idle(&self, max_idle: Duration) -> CortexResult<usize> {
        let cutoff = Utc::now() - max_idle;
        let stale: Vec<String> = self
            .sessions
            .iter()
            .filter(|e| e.context.last_activity < cutoff)
            .map(|e| e.key().clone())
            .collect();
        for id in &stale {
            self.end_session(id)?;
        }
        Ok(stale.len())
    }

    fn set_active(&self, session_id: Option<String>) -> CortexResult<()> {
        let mut active = self
            .active
            .write()
            .map_err(|e| CortexError::ConcurrencyError(e.to_string()))?;
        *active = session_id;
        Ok(())
    }

    fn with_entry<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut SessionEntry) -> T,
    ) -> CortexResult<T> {
        let mut entry =
            self.sessions
                .get_mut(session_id)
                .ok_or_else(|| CortexError::SessionNotFound {
                    id: session_id.to_string(),
                })?;
        Ok(f(&mut entry))
    }
}

impl ISessionTracker for SessionManager {
    async fn get_active_session(&self) -> CortexResult<Option<SessionContext>> {
        Ok(self
            .active_session_id()?
            .and_then(|id| self.get_session(&id)))
    }

    async fn record_memory_loaded(
        &self,
        session_id: &str,
        memory_id: &str,
        tokens: usize,
    ) -> CortexResult<()> {
        self.with_entry(session_id, |entry| {
            entry.context.mark_loaded(memory_id, tokens);
            entry.efficiency.record_sent(tokens);
        })
    }

    async fn record_dedup_savings(&self, session_id: &str, tokens_saved: usize) -> CortexResult<()> {
        self.with_entry(session_id, |entry| entry.efficiency.record_saved(tokens_saved))
    }
}
