//! Namespaced key-to-bytes storage for blobgate.
//!
//! A blob store maps `(namespace, key)` pairs to opaque byte strings. It is
//! the only place record state lives; everything above it is stateless.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`InMemoryBlobStore`] -- `HashMap`-based store for tests and embedding
//! - [`FsBlobStore`] -- one directory per namespace, one file per key
//!
//! # Design Rules
//!
//! 1. `set` is an unconditional upsert: the last completed write wins.
//! 2. A write is all-or-nothing; readers never observe a partial value.
//! 3. An absent key is `Ok(None)`, never an error.
//! 4. The store never interprets values -- it is a pure key-value store.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod namespace;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use memory::InMemoryBlobStore;
pub use namespace::Namespace;
pub use traits::BlobStore;
