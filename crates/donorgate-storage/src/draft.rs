use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::state;
use crate::store::KeyValueStore;

/// Best-effort persistence of one in-progress draft.
///
/// Drafts are a convenience cache, never the source of truth: every failure
/// is logged and absorbed, and a draft that cannot be read is reported as
/// absent so the caller starts fresh.
#[derive(Clone)]
pub struct DraftStore {
    backend: Option<Arc<dyn KeyValueStore>>,
    key: String,
}

impl DraftStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend: Some(backend),
            key: key.into(),
        }
    }

    /// A store that never remembers anything.
    pub fn disabled(key: impl Into<String>) -> Self {
        Self {
            backend: None,
            key: key.into(),
        }
    }

    pub fn from_backend(backend: Option<Arc<dyn KeyValueStore>>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn load<T: DeserializeOwned>(&self) -> Option<T> {
        let backend = self.backend.as_deref()?;
        match state::load_state::<T>(backend, &self.key) {
            Ok(draft) => {
                tracing::debug!(key = %self.key, "draft loaded");
                Some(draft)
            }
            Err(StorageError::NotFound { .. }) => {
                tracing::debug!(key = %self.key, "no saved draft");
                None
            }
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable draft");
                if let Err(e) = backend.delete(&self.key) {
                    tracing::warn!(key = %self.key, error = %e, "failed to remove unreadable draft");
                }
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to load draft");
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, draft: &T) {
        let Some(backend) = self.backend.as_deref() else {
            return;
        };
        match state::save_state(backend, &self.key, draft) {
            Ok(()) => tracing::debug!(key = %self.key, "draft saved"),
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to save draft"),
        }
    }

    pub fn clear(&self) {
        let Some(backend) = self.backend.as_deref() else {
            return;
        };
        if let Err(e) = backend.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear draft");
        }
    }
}

impl std::fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftStore")
            .field("key", &self.key)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
