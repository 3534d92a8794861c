//! Album storefront service.
//!
//! A small HTTP service used as the target of the cold-start benchmark.
//! It can be hosted in-process through [`StoreServer`] or run standalone
//! through the `store-api` binary.

pub mod catalog;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub use catalog::{Album, Catalog};

/// Build the storefront router.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/api/albums", get(handlers::albums_handler))
        .route("/health", get(handlers::health_handler))
        .layer(Extension(catalog))
        .layer(TraceLayer::new_for_http())
}

/// A storefront bound to a local address and serving on a background task.
pub struct StoreServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl StoreServer {
    /// Bind `addr` and start serving.
    ///
    /// Returns once the listener is bound, so requests issued after this
    /// call are accepted.
    pub async fn start(addr: SocketAddr) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::new(Catalog::seeded()));

        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!(error = %e, "Store server failed");
            }
        });

        info!(address = %addr, "Store server listening");
        Ok(Self { addr, task })
    }

    /// The bound address (resolves port 0 to the real port).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop serving.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for StoreServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
