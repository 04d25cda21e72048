use std::collections::HashMap;

use tracing::debug;

use crate::error::StoreError;
use crate::model::ChatSession;

/// Key under which [`KvSessionStore`] keeps the session list.
pub const SESSIONS_KEY: &str = "chatSessions";

/// A string key-value backend (browser local storage, a file, a test map).
pub trait KeyValue {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryKv {
    entries: HashMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Persistence for the session list.
pub trait SessionStore {
    /// Returns the stored sessions, or `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<ChatSession>>, StoreError>;

    /// Stores `sessions`. Returns `false` if nothing was written.
    fn save(&mut self, sessions: &[ChatSession]) -> Result<bool, StoreError>;
}

/// Stores the session list as JSON under [`SESSIONS_KEY`].
///
/// Saving an empty list is skipped, so a freshly started, not yet loaded host cannot wipe the
/// stored history.
#[derive(Clone, Debug, Default)]
pub struct KvSessionStore<B> {
    backend: B,
}

impl<B: KeyValue> KvSessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}

impl<B: KeyValue> SessionStore for KvSessionStore<B> {
    fn load(&self) -> Result<Option<Vec<ChatSession>>, StoreError> {
        let Some(raw) = self.backend.get(SESSIONS_KEY)? else {
            debug!("no stored sessions");
            return Ok(None);
        };
        let sessions: Vec<ChatSession> = serde_json::from_str(&raw).map_err(StoreError::Decode)?;
        debug!(count = sessions.len(), "loaded sessions");
        Ok(Some(sessions))
    }

    fn save(&mut self, sessions: &[ChatSession]) -> Result<bool, StoreError> {
        if sessions.is_empty() {
            debug!("skipping save of empty session list");
            return Ok(false);
        }
        let raw = serde_json::to_string(sessions).map_err(StoreError::Encode)?;
        self.backend.set(SESSIONS_KEY, raw)?;
        debug!(count = sessions.len(), "saved sessions");
        Ok(true)
    }
}
