use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;
use crate::store::KeyValueStore;

/// Load a JSON value. A missing key is [`StorageError::NotFound`].
pub fn load_state<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get(key)?.ok_or_else(|| StorageError::NotFound {
        key: key.to_string(),
    })?;
    let value: T = serde_json::from_slice(&body)?;
    Ok(value)
}

/// Save a JSON value, replacing whatever was stored under `key`.
pub fn save_state<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put(key, &body)
}
