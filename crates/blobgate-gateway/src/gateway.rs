use std::sync::Arc;

use blobgate_store::BlobStore;
use bytes::Bytes;
use tracing::{debug, error, info};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::record::{decode_document, encode_document, extract_id, RecordId};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Acknowledgment of a successful [`RecordGateway::put`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stored {
    pub id: RecordId,
}

/// Result of a [`RecordGateway::get`] that reached the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The exact bytes last stored under the id.
    Found(Bytes),
    /// Nothing has been stored under the id.
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_payload(self) -> Option<Bytes> {
        match self {
            Self::Found(payload) => Some(payload),
            Self::NotFound => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordGateway
// ---------------------------------------------------------------------------

/// Validates and persists keyed JSON records in a [`BlobStore`].
///
/// The gateway holds no mutable state: every record lives in the backend,
/// so one instance can serve any number of concurrent requests. Concurrent
/// writes to the same id are not coordinated; the backend picks the winner.
pub struct RecordGateway {
    store: Arc<dyn BlobStore>,
    config: GatewayConfig,
}

impl RecordGateway {
    pub fn new(store: Arc<dyn BlobStore>, config: GatewayConfig) -> Self {
        Self { store, config }
    }

    /// The current configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Decode, validate and store a record.
    ///
    /// Validation happens before the backend is touched: an undecodable
    /// body is [`GatewayError::InvalidInput`], a missing or empty id is
    /// [`GatewayError::MissingIdentifier`]. The document is re-encoded as
    /// compact JSON and written under its id, replacing any prior record.
    pub async fn put(&self, raw: &[u8]) -> GatewayResult<Stored> {
        let document = decode_document(raw)?;
        let id = extract_id(&document, &self.config.id_field)?;
        let encoded = encode_document(&document)?;
        let bytes = encoded.len();

        self.store
            .set(&self.config.namespace, id.as_str(), Bytes::from(encoded))
            .await
            .map_err(|e| {
                error!(namespace = %self.config.namespace, %id, error = %e, "could not save record");
                GatewayError::Backend(e)
            })?;

        info!(namespace = %self.config.namespace, %id, bytes, "record saved");
        Ok(Stored { id })
    }

    /// Look up the record stored under `id`.
    ///
    /// An empty `id` is rejected without a lookup. A missing record is
    /// [`Lookup::NotFound`]; only backend errors are `Err`.
    pub async fn get(&self, id: &str) -> GatewayResult<Lookup> {
        let id = RecordId::new(id).ok_or_else(|| GatewayError::missing(&self.config.id_field))?;

        let found = self
            .store
            .get(&self.config.namespace, id.as_str())
            .await
            .map_err(|e| {
                error!(namespace = %self.config.namespace, %id, error = %e, "could not fetch record");
                GatewayError::Backend(e)
            })?;

        debug!(namespace = %self.config.namespace, %id, found = found.is_some(), "record lookup");
        Ok(found.map_or(Lookup::NotFound, Lookup::Found))
    }
}

impl std::fmt::Debug for RecordGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordGateway")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
