//! donorgate-storage
//!
//! Key-value persistence for drafts and records. The engines only see the
//! [`store::KeyValueStore`] trait; the host picks the backend.

pub mod draft;
pub mod error;
pub mod file;
pub mod state;
pub mod store;

pub use crate::draft::DraftStore;
pub use crate::error::StorageError;
pub use crate::file::FileStore;
pub use crate::store::{KeyValueStore, MemoryStore};
