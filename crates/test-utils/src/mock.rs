//! Mock HTTP endpoint with controllable latency and status.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use tokio::sync::watch;
use tokio::task::JoinHandle;

struct MockState {
    hits: watch::Sender<u64>,
    delay_ms: AtomicU64,
    status: AtomicU16,
    /// First hit (1-based) that answers 500; 0 disables.
    fail_from_hit: AtomicU64,
}

/// An HTTP endpoint on an ephemeral local port.
///
/// Every `GET` on any path counts as a hit. Responses are delayed by the
/// configured latency and answered with the configured status.
pub struct MockEndpoint {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockEndpoint {
    /// Start an endpoint answering `200 OK` with no extra delay.
    pub async fn start() -> Self {
        let (hits, _) = watch::channel(0u64);
        let state = Arc::new(MockState {
            hits,
            delay_ms: AtomicU64::new(0),
            status: AtomicU16::new(200),
            fail_from_hit: AtomicU64::new(0),
        });

        let app = Router::new()
            .route("/", get(respond))
            .route("/*path", get(respond))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock endpoint");
        let addr = listener.local_addr().expect("Mock endpoint has no address");

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state, task }
    }

    /// Base URL of the endpoint, with a trailing slash.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Delay every subsequent response by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Answer every subsequent request with `status`.
    pub fn set_status(&self, status: u16) {
        self.state.status.store(status, Ordering::SeqCst);
    }

    /// Answer `500` from hit number `hit` (1-based) onwards.
    pub fn fail_from_hit(&self, hit: u64) {
        self.state.fail_from_hit.store(hit, Ordering::SeqCst);
    }

    /// Number of requests received so far.
    pub fn hits(&self) -> u64 {
        *self.state.hits.borrow()
    }

    /// Resolve once at least `count` requests have been received.
    pub async fn wait_for_hits(&self, count: u64) {
        let mut rx = self.state.hits.subscribe();
        let _ = rx.wait_for(|hits| *hits >= count).await;
    }
}

impl Drop for MockEndpoint {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(State(state): State<Arc<MockState>>) -> StatusCode {
    let mut hit = 0;
    state.hits.send_modify(|hits| {
        *hits += 1;
        hit = *hits;
    });

    let delay_ms = state.delay_ms.load(Ordering::SeqCst);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    let fail_from = state.fail_from_hit.load(Ordering::SeqCst);
    if fail_from != 0 && hit >= fail_from {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    StatusCode::from_u16(state.status.load(Ordering::SeqCst))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_hits_and_answers_ok() {
        let endpoint = MockEndpoint::start().await;

        let status = reqwest::get(endpoint.url()).await.unwrap().status();
        assert_eq!(status.as_u16(), 200);
        assert_eq!(endpoint.hits(), 1);
    }

    #[tokio::test]
    async fn test_configured_status_and_failure_point() {
        let endpoint = MockEndpoint::start().await;
        endpoint.set_status(204);
        endpoint.fail_from_hit(2);

        let first = reqwest::get(endpoint.url()).await.unwrap().status();
        let second = reqwest::get(endpoint.url()).await.unwrap().status();

        assert_eq!(first.as_u16(), 204);
        assert_eq!(second.as_u16(), 500);
    }

    #[tokio::test]
    async fn test_wait_for_hits_resolves() {
        let endpoint = MockEndpoint::start().await;
        let url = endpoint.url();

        tokio::spawn(async move {
            for _ in 0..3 {
                reqwest::get(&url).await.unwrap();
            }
        });

        tokio::time::timeout(Duration::from_secs(5), endpoint.wait_for_hits(3))
            .await
            .unwrap();
        assert!(endpoint.hits() >= 3);
    }
}
