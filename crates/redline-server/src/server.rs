use std::sync::Arc;

use tokio::net::TcpListener;

use redline_engine::{EngineConfig, RevisionEngine};
use redline_store::{FsDocumentStore, FsStoreConfig};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// The review API server.
pub struct RedlineServer {
    config: ServerConfig,
}

impl RedlineServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router over a filesystem store (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        let store = FsDocumentStore::open(FsStoreConfig::new(&self.config.store_root))?;
        let engine = RevisionEngine::new(
            Arc::new(store),
            EngineConfig::new(self.config.context_lines),
        );
        build_router(Arc::new(engine), self.config.allowed_origin.as_deref())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("redline server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|err| ServerError::Internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = RedlineServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:8000".parse().unwrap()
        );
    }

    #[test]
    fn router_builds_over_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            store_root: dir.path().join("store"),
            ..Default::default()
        };
        let server = RedlineServer::new(config);
        assert!(server.router().is_ok());
    }

    #[test]
    fn malformed_origin_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            store_root: dir.path().join("store"),
            allowed_origin: Some("not an\norigin".to_string()),
            ..Default::default()
        };
        let server = RedlineServer::new(config);
        assert!(matches!(
            server.router().unwrap_err(),
            ServerError::Config(_)
        ));
    }
}
