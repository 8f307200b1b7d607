//! Driven port for per-client key-value persistence.
//!
//! Values are opaque strings; services own the JSON encoding so that corrupt
//! entries can be detected and treated as absent.

use async_trait::async_trait;

use super::{StorageKey, StorageNamespace, define_port_error};

define_port_error! {
    /// Errors surfaced by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The backing medium could not be read or written.
        Backend { message: String } => "key-value store backend failure: {message}",
    }
}

/// Local-storage-like persistence scoped by client namespace.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
    ) -> Result<Option<String>, KeyValueStoreError>;

    /// Replace the value stored under `key`.
    async fn set(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
        value: String,
    ) -> Result<(), KeyValueStoreError>;
}
