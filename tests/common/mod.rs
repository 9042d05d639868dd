//! Common test utilities for integration tests.
//!
//! [`TestServer`] runs the real router on an ephemeral port and shuts it down
//! when dropped.

#![allow(dead_code)]

use std::sync::Arc;

use fibex::adapters::InMemoryStore;
use fibex::config::ServerConfig;
use fibex::http::serve_on;
use fibex::render::{PageRenderer, INDEX_HTML};
use fibex::services::AppState;
use fibex::traits::CatalogStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl TestServer {
    /// Serve over a fresh in-memory store, returned for inspection.
    pub async fn start() -> (Self, InMemoryStore) {
        let store = InMemoryStore::new();
        let server = Self::start_with(Arc::new(store.clone()), ServerConfig::new()).await;
        (server, store)
    }

    /// Serve `store` with `config`. The embedded page template is used.
    pub async fn start_with(store: Arc<dyn CatalogStore>, config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("No local address");

        let renderer = PageRenderer::with_template(INDEX_HTML, &config.base);
        let state = AppState::new(store, renderer, config);
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_on(listener, state, async {
            let _ = rx.await;
        }));

        Self {
            base_url: format!("http://{}", addr),
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Stop the server and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .expect("Server task panicked")
                .expect("Server failed");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}
