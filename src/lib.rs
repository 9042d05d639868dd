//! Fibex - a folder and car catalog served over HTTP, with a golden-angle
//! spiral view of the folders.
//!
//! This library exposes modules for use by the binary and integration tests.

pub mod adapters;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod render;
pub mod services;
pub mod spiral;
pub mod telemetry;
pub mod traits;
pub mod ui;
