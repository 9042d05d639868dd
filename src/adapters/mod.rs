//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`SqliteStore`] - Catalog store on a SQLite file
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`ApiSource`] - Catalog source that goes through the HTTP API
//! - [`BrowserOpener`] - Opens picked links in the system browser
//! - [`RedirectOpener`] - Keeps the picked link for an HTTP redirect
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::InMemoryStore`] - Store with failure injection
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::RecordingOpener`] - Records opened links
//! - [`mock::MockSurface`] - Counts surface lifecycle calls

pub mod api_source;
pub mod browser_opener;
pub mod mock;
pub mod reqwest_http;
pub mod sqlite_store;

pub use api_source::ApiSource;
pub use browser_opener::{BrowserOpener, RedirectOpener};
pub use mock::{InMemoryStore, MockHttpClient, MockSurface, RecordingOpener};
pub use reqwest_http::ReqwestHttpClient;
pub use sqlite_store::SqliteStore;
