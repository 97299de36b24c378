//! Record store gateway.
//!
//! Accepts JSON documents identified by one field, persists them in a
//! [`blobgate_store::BlobStore`] namespace keyed by that identifier, and
//! returns them verbatim on lookup. Two operations exist:
//!
//! - [`RecordGateway::put`] -- decode, validate the identifier, upsert
//! - [`RecordGateway::get`] -- exact-key lookup returning the stored bytes
//!
//! # Quick Start
//!
//! ```rust
//! use blobgate_gateway::{decode_document, extract_id};
//!
//! let document = decode_document(br#"{"orderId":"A100","total":42}"#).unwrap();
//! let id = extract_id(&document, "orderId").unwrap();
//! assert_eq!(id.as_str(), "A100");
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod record;

// Re-exports for convenience.
pub use config::{GatewayConfig, DEFAULT_ID_FIELD, DEFAULT_NAMESPACE};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{Lookup, RecordGateway, Stored};
pub use record::{decode_document, encode_document, extract_id, Document, RecordId};
