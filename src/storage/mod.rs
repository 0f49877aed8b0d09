//! Persistence layer: a best-effort key/value store of JSON documents.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys as constants.
pub mod keys {
    /// Ordered flight collection
    pub const FLIGHTS: &str = "skyLog_flights";
    /// User settings record
    pub const SETTINGS: &str = "skyLog_settings";
}

/// A string-valued key/value store.
///
/// Implementations make no durability promises beyond "best effort". Calls
/// are synchronous and may block on file I/O.
pub trait KeyValueStore: Send + Sync {
    /// Read the document under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
