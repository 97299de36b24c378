use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{StoreError, StoreResult};
use crate::namespace::Namespace;
use crate::traits::BlobStore;

type Entries = HashMap<Namespace, HashMap<String, Bytes>>;

/// In-memory, HashMap-based blob store.
///
/// Intended for tests and embedding. Values live behind a `RwLock` and are
/// cheaply cloned on read (`Bytes` is reference counted).
///
/// Reads and writes can be switched into a failing mode to exercise the
/// backend-failure paths of callers.
pub struct InMemoryBlobStore {
    entries: RwLock<Entries>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    calls: AtomicUsize,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of values stored in `namespace`.
    pub fn len(&self, namespace: &Namespace) -> StoreResult<usize> {
        let map = self.read_entries()?;
        Ok(map.get(namespace).map_or(0, HashMap::len))
    }

    /// Returns `true` if no namespace holds any value.
    pub fn is_empty(&self) -> StoreResult<bool> {
        let map = self.read_entries()?;
        Ok(map.values().all(HashMap::is_empty))
    }

    /// Number of `get`/`set` calls that reached this store.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent `get` fail with [`StoreError::Unavailable`].
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `set` fail with [`StoreError::Unavailable`].
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn read_entries(&self) -> StoreResult<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, namespace: &Namespace, key: &str) -> StoreResult<Option<Bytes>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".into()));
        }
        let map = self.read_entries()?;
        Ok(map.get(namespace).and_then(|ns| ns.get(key)).cloned())
    }

    async fn set(&self, namespace: &Namespace, key: &str, value: Bytes) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".into()));
        }
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))?;
        map.entry(namespace.clone())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let namespaces = self.entries.read().map(|m| m.len()).unwrap_or(0);
        f.debug_struct("InMemoryBlobStore")
            .field("namespaces", &namespaces)
            .finish()
    }
}
