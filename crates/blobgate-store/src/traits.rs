use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreResult;
use crate::namespace::Namespace;

/// Namespaced key-to-bytes store.
///
/// All implementations must satisfy these invariants:
/// - `set` overwrites unconditionally; concurrent writers to one key race
///   and exactly one of their values survives.
/// - A value is either fully written or not written at all.
/// - `get` returns the bytes exactly as last written.
/// - The store never interprets values.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    /// Returns `Err` if the backend could not answer.
    async fn get(&self, namespace: &Namespace, key: &str) -> StoreResult<Option<Bytes>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, namespace: &Namespace, key: &str, value: Bytes) -> StoreResult<()>;

    /// Check whether a key exists.
    ///
    /// Default implementation reads the value. Backends may override for a
    /// cheaper existence check.
    async fn exists(&self, namespace: &Namespace, key: &str) -> StoreResult<bool> {
        Ok(self.get(namespace, key).await?.is_some())
    }
}
