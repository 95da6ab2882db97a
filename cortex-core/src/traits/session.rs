use crate::errors::CortexResult;
use crate::models::SessionContext;

/// Narrow view of an externally owned session manager.
#[allow(async_fn_in_trait)]
pub trait ISessionTracker: Send + Sync {
    /// Snapshot of the active session, if any.
    async fn get_active_session(&self) -> CortexResult<Option<SessionContext>>;

    /// Record that `memory_id` was delivered to `session_id` at a cost of `tokens`.
    async fn record_memory_loaded(
        &self,
        session_id: &str,
        memory_id: &str,
        tokens: usize,
    ) -> CortexResult<()>;

    /// Record tokens avoided by not re-sending loaded memories.
    async fn record_dedup_savings(&self, session_id: &str, tokens_saved: usize) -> CortexResult<()> {
        let _ = (session_id, tokens_saved);
        Ok(())
    }
}
