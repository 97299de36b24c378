use std::sync::Arc;

use blobgate_gateway::RecordGateway;
use blobgate_store::BlobStore;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Record endpoint server.
pub struct BlobgateServer {
    config: ServerConfig,
    gateway: Arc<RecordGateway>,
}

impl BlobgateServer {
    /// Validate `config` and open the backend it names.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let store = config.backend.open()?;
        Self::with_store(config, store)
    }

    /// Serve records out of an already-open store.
    pub fn with_store(config: ServerConfig, store: Arc<dyn BlobStore>) -> ServerResult<Self> {
        let gateway = RecordGateway::new(store, config.gateway_config()?);
        Ok(Self {
            config,
            gateway: Arc::new(gateway),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let state = AppState::new(self.gateway.clone(), self.config.id_param.as_str());
        build_router(state, &self.config)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %listener.local_addr()?,
            route = %self.config.route,
            namespace = %self.config.namespace,
            "blobgate listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn server_construction() {
        let server = BlobgateServer::new(ServerConfig::default()).unwrap();
        assert_eq!(server.config().bind_addr, "127.0.0.1:8888".parse().unwrap());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ServerConfig {
            route: "no-slash".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            BlobgateServer::new(config),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn filesystem_backend_opens() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            backend: BackendConfig::Filesystem {
                root: dir.path().to_path_buf(),
                sync_writes: false,
            },
            ..ServerConfig::default()
        };
        let server = BlobgateServer::new(config).unwrap();
        let _router = server.router();
    }
}
