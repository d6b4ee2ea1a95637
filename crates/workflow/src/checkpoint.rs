//! Session persistence — serialized state snapshots keyed by session id.
//!
//! The executor never touches this: it accepts a pre-populated state and
//! returns the final one. The boundary adapter decides whether to load a
//! prior snapshot before a run and save the result after.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use advisor_core::{ConversationState, StorageError};

/// A key-value store of conversation snapshots.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The backend name (e.g. "in_memory").
    fn name(&self) -> &str;

    /// Persist a snapshot under the session id, replacing any prior one.
    async fn save(
        &self,
        session_id: &str,
        state: &ConversationState,
    ) -> Result<(), StorageError>;

    /// Load the snapshot for a session, if one exists.
    async fn load(&self, session_id: &str) -> Result<Option<ConversationState>, StorageError>;

    /// Remove a session. Returns whether one existed.
    async fn delete(&self, session_id: &str) -> Result<bool, StorageError>;

    /// Number of stored sessions.
    async fn count(&self) -> Result<usize, StorageError>;
}

/// An in-memory session store holding serialized snapshots.
///
/// Useful for testing and single-process deployments; snapshots go
/// through serde so a durable backend can swap in without changing
/// call sites.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn save(
        &self,
        session_id: &str,
        state: &ConversationState,
    ) -> Result<(), StorageError> {
        let snapshot =
            serde_json::to_string(state).map_err(|e| StorageError::Store(e.to_string()))?;
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), snapshot);
        Ok(())
    }

    async fn load(&self, session_id: &str) -> Result<Option<ConversationState>, StorageError> {
        let sessions = self.sessions.read().await;
        match sessions.get(session_id) {
            None => Ok(None),
            Some(snapshot) => serde_json::from_str(snapshot)
                .map(Some)
                .map_err(|e| StorageError::Corrupt(e.to_string())),
        }
    }

    async fn delete(&self, session_id: &str) -> Result<bool, StorageError> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{NextStep, StepId};

    #[tokio::test]
    async fn save_load_roundtrip() {
        let store = InMemorySessionStore::new();
        let mut state = ConversationState::new("question", vec!["bcdr".into()]);
        state.iteration_count = 2;
        state.next_step = Some(NextStep::Step(StepId::Bcdr));

        store.save("session-1", &state).await.unwrap();
        let loaded = store.load("session-1").await.unwrap().unwrap();

        assert_eq!(loaded.iteration_count, 2);
        assert_eq!(loaded.offerings, vec!["bcdr".to_string()]);
        assert_eq!(loaded.next_step, Some(NextStep::Step(StepId::Bcdr)));
        assert_eq!(loaded.messages.len(), 1);
    }

    #[tokio::test]
    async fn load_missing_session_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_prior_snapshot() {
        let store = InMemorySessionStore::new();
        let mut state = ConversationState::new("question", vec![]);

        store.save("s", &state).await.unwrap();
        state.iteration_count = 5;
        store.save("s", &state).await.unwrap();

        let loaded = store.load("s").await.unwrap().unwrap();
        assert_eq!(loaded.iteration_count, 5);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = InMemorySessionStore::new();
        let state = ConversationState::new("question", vec![]);

        store.save("s", &state).await.unwrap();
        assert!(store.delete("s").await.unwrap());
        assert!(!store.delete("s").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
