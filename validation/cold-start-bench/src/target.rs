//! The service under test.

use std::net::SocketAddr;

use async_trait::async_trait;
use store_api::StoreServer;
use tracing::info;

use crate::error::{BenchError, BenchResult};

/// Something the harness can bring up and then send requests to.
#[async_trait]
pub trait TargetService: Send {
    /// Start the service and return the URL to request.
    ///
    /// Returns only once the service accepts connections; the time spent
    /// here is reported as server startup time.
    async fn start(&mut self) -> BenchResult<String>;
}

/// The album storefront hosted inside the harness process.
pub struct EmbeddedStore {
    listen: SocketAddr,
    server: Option<StoreServer>,
}

impl EmbeddedStore {
    pub fn new(listen: SocketAddr) -> Self {
        Self {
            listen,
            server: None,
        }
    }

    /// Bound address once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(StoreServer::local_addr)
    }
}

#[async_trait]
impl TargetService for EmbeddedStore {
    async fn start(&mut self) -> BenchResult<String> {
        let server = StoreServer::start(self.listen)
            .await
            .map_err(|e| BenchError::TargetStartup(format!("{:#}", e)))?;
        let url = format!("http://{}/", server.local_addr());
        info!(url = %url, "Embedded store started");

        self.server = Some(server);
        Ok(url)
    }
}

/// A service that is already running elsewhere.
pub struct ExternalTarget {
    url: String,
}

impl ExternalTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl TargetService for ExternalTarget {
    async fn start(&mut self) -> BenchResult<String> {
        Ok(self.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_store_serves_after_start() {
        let mut target = EmbeddedStore::new("127.0.0.1:0".parse().unwrap());
        assert!(target.local_addr().is_none());

        let url = target.start().await.unwrap();
        assert_eq!(url, format!("http://{}/", target.local_addr().unwrap()));

        let status = reqwest::get(&url).await.unwrap().status();
        assert!(status.is_success());
    }

    #[tokio::test]
    async fn test_embedded_store_reports_bind_failure() {
        let mut first = EmbeddedStore::new("127.0.0.1:0".parse().unwrap());
        first.start().await.unwrap();

        let mut second = EmbeddedStore::new(first.local_addr().unwrap());
        let err = second.start().await.unwrap_err();
        assert!(matches!(err, BenchError::TargetStartup(_)));
    }

    #[tokio::test]
    async fn test_external_target_returns_configured_url() {
        let mut target = ExternalTarget::new("http://10.1.2.3:8080/");
        assert_eq!(target.start().await.unwrap(), "http://10.1.2.3:8080/");
    }
}
