use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::content::store::ContentStore;
use crate::llm_client::ChatModel;
use crate::session::SessionGate;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The single owner of all portfolio content. Handlers take the lock
    /// for one synchronous store operation and never hold it across an await.
    pub store: Arc<RwLock<ContentStore>>,
    pub session: SessionGate,
    /// Pluggable chat backend. Production: `GeminiClient`. Tests swap in a
    /// scripted stub.
    pub chat: Arc<dyn ChatModel>,
}

impl AppState {
    pub fn new(store: ContentStore, session: SessionGate, chat: Arc<dyn ChatModel>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            session,
            chat,
        }
    }

    pub fn content(&self) -> RwLockReadGuard<'_, ContentStore> {
        self.store.read().expect("content store lock poisoned")
    }

    pub fn content_mut(&self) -> RwLockWriteGuard<'_, ContentStore> {
        self.store.write().expect("content store lock poisoned")
    }
}
