//! JSON read/write helpers over the key-value store.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::Error;
use super::ports::{KeyValueStore, KeyValueStoreError, StorageKey, StorageNamespace};

pub(crate) fn map_store_error(error: KeyValueStoreError) -> Error {
    match error {
        KeyValueStoreError::Backend { message } => {
            Error::service_unavailable(format!("client storage unavailable: {message}"))
        }
    }
}

/// Read and decode a stored value. Undecodable values are logged and read as
/// absent.
pub(crate) async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    namespace: &StorageNamespace,
    key: StorageKey,
) -> Result<Option<T>, Error> {
    let Some(raw) = store.get(namespace, key).await.map_err(map_store_error)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key = %key, error = %err, "ignoring corrupt stored value");
            Ok(None)
        }
    }
}

pub(crate) async fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    namespace: &StorageNamespace,
    key: StorageKey,
    value: &T,
) -> Result<(), Error> {
    let raw = serde_json::to_string(value)
        .map_err(|err| Error::internal(format!("failed to encode {key}: {err}")))?;
    store
        .set(namespace, key, raw)
        .await
        .map_err(map_store_error)
}
