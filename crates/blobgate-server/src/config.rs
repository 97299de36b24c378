use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blobgate_gateway::{GatewayConfig, DEFAULT_ID_FIELD, DEFAULT_NAMESPACE};
use blobgate_store::{BlobStore, FsBlobStore, InMemoryBlobStore};
use serde::{Deserialize, Serialize};

use crate::endpoint::endpoints;
use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from TOML.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Path of the record endpoint.
    pub route: String,
    /// Blob store namespace holding the records.
    pub namespace: String,
    /// Document field carrying the identifier on `POST`.
    pub id_field: String,
    /// Query parameter carrying the identifier on `GET`.
    pub id_param: String,
    /// Request bodies above this size are refused with `413`.
    pub max_body_bytes: usize,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub backend: BackendConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8888".parse().unwrap(),
            route: endpoints::RECORDS.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            id_field: DEFAULT_ID_FIELD.into(),
            id_param: "id".into(),
            max_body_bytes: 1024 * 1024,
            log_level: "info".into(),
            backend: BackendConfig::default(),
        }
    }
}

/// Where records are persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackendConfig {
    /// Process memory; lost on exit.
    #[default]
    Memory,
    /// One file per record under `root`.
    Filesystem {
        root: PathBuf,
        #[serde(default = "default_sync_writes")]
        sync_writes: bool,
    },
}

fn default_sync_writes() -> bool {
    true
}

impl BackendConfig {
    /// Open the configured blob store.
    pub fn open(&self) -> ServerResult<Arc<dyn BlobStore>> {
        Ok(match self {
            Self::Memory => Arc::new(InMemoryBlobStore::new()),
            Self::Filesystem { root, sync_writes } => {
                Arc::new(FsBlobStore::open(root)?.with_sync_writes(*sync_writes))
            }
        })
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("failed to read config file '{}': {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text).map_err(|e| {
            ServerError::Config(format!("config file '{}': {e}", path.display()))
        })?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the fields the router and gateway depend on.
    pub fn validate(&self) -> ServerResult<()> {
        if !self.route.starts_with('/') {
            return Err(ServerError::Config(format!(
                "route '{}' must start with '/'",
                self.route
            )));
        }
        if self.route.contains(&[':', '*', '{', '}'][..]) {
            return Err(ServerError::Config(format!(
                "route '{}' must be a literal path",
                self.route
            )));
        }
        if self.route == endpoints::HEALTH {
            return Err(ServerError::Config(format!(
                "route '{}' is reserved",
                self.route
            )));
        }
        if self.id_param.is_empty() {
            return Err(ServerError::Config("id_param must not be empty".into()));
        }
        if self.max_body_bytes == 0 {
            return Err(ServerError::Config("max_body_bytes must be positive".into()));
        }
        self.gateway_config()?;
        Ok(())
    }

    /// Gateway settings derived from this configuration.
    pub fn gateway_config(&self) -> ServerResult<GatewayConfig> {
        GatewayConfig::new(&self.namespace, self.id_field.clone())
            .map_err(|e| ServerError::Config(e.to_string()))
    }
}
