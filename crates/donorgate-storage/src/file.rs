use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use donorgate_core::config::DraftSettings;
use donorgate_core::keys;

use crate::error::StorageError;
use crate::store::KeyValueStore;

/// Store backed by one file per key under a root directory.
///
/// Writes are atomic (tmp + rename), so a crash mid-write leaves the previous
/// value in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

/// Platform data directory for donorgate, e.g. `~/.local/share/donorgate`.
pub fn default_root() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join("donorgate"))
}

pub fn default_config_path() -> Option<PathBuf> {
    default_root().map(|root| root.join(keys::CONFIG_FILE))
}

/// Open the draft backend described by the config. `None` when drafts are
/// disabled or no data directory can be found.
pub fn open_draft_backend(settings: &DraftSettings) -> Option<Arc<dyn KeyValueStore>> {
    if !settings.enabled {
        tracing::debug!("draft persistence disabled");
        return None;
    }
    let root = settings.directory.clone().or_else(default_root)?;
    Some(Arc::new(FileStore::new(root)))
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, body: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp_path = PathBuf::from(tmp);
        std::fs::write(&tmp_path, body)?;
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!(path = %path.display(), "entry written");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
