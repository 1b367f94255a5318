//! String-keyed persistent storage with browser `localStorage` semantics.

pub mod memory;
pub mod file;
pub mod persisted;

use thiserror::Error;

#[allow(unused_imports)]
pub use memory::MemoryStore;
pub use file::FileStore;
pub use persisted::{CartRepository, CART_STORAGE_KEY};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),
    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// A durable key-value store holding text values.
///
/// Writes always replace the whole value.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    #[allow(dead_code)]
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
