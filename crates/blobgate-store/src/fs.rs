//! File-backed blob store.
//!
//! Layout on disk:
//!
//! ```text
//! <root>/<namespace>/<hex(key)>
//! ```
//!
//! Keys are hex encoded so that any key string maps to a safe, flat file
//! name. Writes land in a temporary file inside the namespace directory and
//! are renamed over the target, so a reader sees either the old or the new
//! value and never a torn one.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use crate::traits::BlobStore;

/// Longest key accepted; hex encoding doubles it and most filesystems cap
/// names at 255 bytes.
pub const MAX_KEY_LEN: usize = 127;

/// Blob store rooted at a directory.
#[derive(Clone, Debug)]
pub struct FsBlobStore {
    root: PathBuf,
    sync_writes: bool,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            sync_writes: true,
        })
    }

    /// Whether to `fsync` each value before it becomes visible. Defaults to `true`.
    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn namespace_dir(&self, namespace: &Namespace) -> PathBuf {
        self.root.join(namespace.as_str())
    }

    fn entry_path(&self, namespace: &Namespace, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if key.len() > MAX_KEY_LEN {
            return Err(StoreError::KeyTooLong {
                len: key.len(),
                max: MAX_KEY_LEN,
            });
        }
        Ok(self.namespace_dir(namespace).join(hex::encode(key)))
    }
}

fn write_atomic(dir: &Path, path: &Path, value: &[u8], sync: bool) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(value)?;
    if sync {
        tmp.as_file().sync_all()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, namespace: &Namespace, key: &str) -> StoreResult<Option<Bytes>> {
        // Keys that `set` refuses can never have been stored.
        if key.len() > MAX_KEY_LEN {
            return Ok(None);
        }
        let path = self.entry_path(namespace, key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => {
                debug!(%namespace, key, bytes = data.len(), "blob read");
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, namespace: &Namespace, key: &str, value: Bytes) -> StoreResult<()> {
        let path = self.entry_path(namespace, key)?;
        let dir = self.namespace_dir(namespace);
        let sync = self.sync_writes;
        let len = value.len();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &path, &value, sync))
            .await
            .map_err(|e| StoreError::Unavailable(format!("write task failed: {e}")))??;
        debug!(%namespace, key, bytes = len, "blob written");
        Ok(())
    }

    async fn exists(&self, namespace: &Namespace, key: &str) -> StoreResult<bool> {
        if key.len() > MAX_KEY_LEN {
            return Ok(false);
        }
        let path = self.entry_path(namespace, key)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}
