//! Process-local key-value store; state is lost on restart.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey, StorageNamespace};

type Entries = HashMap<(StorageNamespace, StorageKey), String>;

/// Key-value store held in memory behind an `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<Entries>,
}

fn poisoned<T>(_: T) -> KeyValueStoreError {
    KeyValueStoreError::backend("in-memory store lock poisoned")
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
    ) -> Result<Option<String>, KeyValueStoreError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&(namespace.clone(), key)).cloned())
    }

    async fn set(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
        value: String,
    ) -> Result<(), KeyValueStoreError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert((namespace.clone(), key), value);
        Ok(())
    }
}
