//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`CatalogStore`] - Folder and car persistence
//! - [`HttpClient`] - JSON requests to the catalog API
//! - [`CatalogSource`] - Where the UI shell loads and creates records
//! - [`LinkOpener`] - Opening a picked node's link
//! - [`RenderSurface`] - Drawing target of a scene session

pub mod http;
pub mod opener;
pub mod source;
pub mod store;
pub mod surface;

pub use http::{ApiRequest, ApiResponse, HttpClient, HttpError, Method};
pub use opener::{is_web_link, LinkOpener, OpenError};
pub use source::{CatalogSource, SourceError};
pub use store::CatalogStore;
pub use surface::{RenderSurface, SurfaceError};
