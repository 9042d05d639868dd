//! Mock implementations for testing.
//!
//! These doubles let services, handlers and the scene session run without a
//! database, a network or a browser.
//!
//! # Available Mocks
//!
//! - [`InMemoryStore`] - Catalog store with failure injection
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`RecordingOpener`] - Link opener that records links
//! - [`MockSurface`] - Render surface that counts lifecycle calls

pub mod http;
pub mod opener;
pub mod store;
pub mod surface;

pub use http::{MockHttpClient, MockResponse};
pub use opener::RecordingOpener;
pub use store::InMemoryStore;
pub use surface::MockSurface;
