//! File-backed key-value store.
//!
//! Each namespace is a directory under the root and each key a JSON file
//! named after it, e.g. `<root>/<namespace>/coffeeFavorites.json`. Writes go
//! to a staging file that is renamed over the target so readers never see a
//! partial value.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError, StorageKey, StorageNamespace};

/// Key-value store persisting values as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryKeyValueStore {
    root: Arc<Utf8PathBuf>,
}

impl DirectoryKeyValueStore {
    /// Open a store rooted at `root`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`io::Error`] when the directory cannot be created.
    pub fn open(root: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let root = root.into();
        Dir::create_ambient_dir_all(&root, ambient_authority())?;
        Ok(Self {
            root: Arc::new(root),
        })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T, KeyValueStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Utf8Path) -> io::Result<T> + Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || op(root.as_path()))
            .await
            .map_err(|error| KeyValueStoreError::backend(format!("storage task failed: {error}")))?
            .map_err(|error| KeyValueStoreError::backend(error.to_string()))
    }
}

fn file_name(key: StorageKey) -> String {
    format!("{}.json", key.name())
}

fn read_value(root: &Utf8Path, namespace: &str, key: StorageKey) -> io::Result<Option<String>> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    let namespace_dir = match dir.open_dir(namespace) {
        Ok(namespace_dir) => namespace_dir,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error),
    };
    match namespace_dir.read_to_string(file_name(key)) {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

fn write_value(root: &Utf8Path, namespace: &str, key: StorageKey, value: &str) -> io::Result<()> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    dir.create_dir_all(namespace)?;
    let namespace_dir = dir.open_dir(namespace)?;

    let target = file_name(key);
    let staging = format!(".{target}.{}.tmp", Uuid::new_v4().simple());
    namespace_dir.write(&staging, value.as_bytes())?;
    if let Err(error) = namespace_dir.rename(&staging, &namespace_dir, &target) {
        let _cleanup_result = namespace_dir.remove_file(&staging);
        return Err(error);
    }
    Ok(())
}

#[async_trait]
impl KeyValueStore for DirectoryKeyValueStore {
    async fn get(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
    ) -> Result<Option<String>, KeyValueStoreError> {
        let ns = namespace.as_str().to_owned();
        self.blocking(move |root| read_value(root, &ns, key)).await
    }

    async fn set(
        &self,
        namespace: &StorageNamespace,
        key: StorageKey,
        value: String,
    ) -> Result<(), KeyValueStoreError> {
        let ns = namespace.as_str().to_owned();
        debug!(namespace = %ns, %key, bytes = value.len(), "writing stored value");
        self.blocking(move |root| write_value(root, &ns, key, &value))
            .await
    }
}
