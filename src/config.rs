//! Server configuration.
//!
//! Values come from the process environment with sensible local defaults.
//! Use the builder methods to override individual settings in tests.
//!
//! # Example
//!
//! ```ignore
//! use fibex::config::{RenderMode, ServerConfig};
//!
//! let config = ServerConfig::default()
//!     .with_port(0)
//!     .with_mode(RenderMode::Production);
//! ```

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default listening port (the port the catalog has always used in development).
pub const DEFAULT_PORT: u16 = 5173;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// How the HTML page is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Template re-read from disk on every request.
    Development,
    /// Template read once at startup; prebuilt client assets served compressed.
    Production,
}

impl RenderMode {
    /// Parse the value of `FIBEX_ENV` / `NODE_ENV`. Only "production" selects
    /// production mode.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => RenderMode::Production,
            _ => RenderMode::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RenderMode::Production)
    }
}

/// Configuration for the catalog server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind (default: 127.0.0.1)
    pub host: IpAddr,
    /// Port to bind (default: 5173, 0 picks a free port)
    pub port: u16,
    /// Public base path of the page and assets (default: "/")
    pub base: String,
    /// Development or production rendering
    pub mode: RenderMode,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Prebuilt client directory served in production
    pub client_dir: PathBuf,
    /// Page template read on every request in development
    pub template_path: PathBuf,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base: "/".to_string(),
            mode: RenderMode::Development,
            database_path: PathBuf::from("fibex.db"),
            client_dir: PathBuf::from("dist/client"),
            template_path: PathBuf::from("index.html"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT") {
            config.port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { raw: raw.clone() })?;
        }

        if let Some(raw) = lookup("HOST") {
            config.host = raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost { raw: raw.clone() })?;
        }

        if let Some(raw) = lookup("BASE") {
            config.base = normalize_base(&raw)?;
        }

        let mode = lookup("FIBEX_ENV").or_else(|| lookup("NODE_ENV"));
        config.mode = RenderMode::from_env_value(mode.as_deref());

        if let Some(raw) = lookup("DATABASE_URL") {
            config.database_path = database_path_from_url(&raw);
        }

        if let Some(raw) = lookup("FIBEX_CLIENT_DIR") {
            config.client_dir = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("FIBEX_TEMPLATE") {
            config.template_path = PathBuf::from(raw);
        }

        if let Some(raw) = lookup("RUST_LOG") {
            if !raw.trim().is_empty() {
                config.log_filter = raw;
            }
        }

        Ok(config)
    }

    /// Address to bind the listener to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the render mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the database file.
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Set the prebuilt client directory.
    pub fn with_client_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.client_dir = dir.into();
        self
    }

    /// Set the development template path.
    pub fn with_template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = path.into();
        self
    }

    /// Set the base path. Invalid input falls back to "/".
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = normalize_base(base).unwrap_or_else(|_| "/".to_string());
        self
    }
}

/// Ensure the base path starts and ends with '/'.
fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }
    // The base is echoed in redirect headers.
    if !trimmed.starts_with('/') || trimmed.chars().any(char::is_control) {
        return Err(ConfigError::InvalidBase {
            raw: raw.to_string(),
        });
    }
    if trimmed.ends_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{}/", trimmed))
    }
}

/// Strip `sqlite:` / `file:` URL prefixes so both URLs and bare paths work.
fn database_path_from_url(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let path = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .or_else(|| trimmed.strip_prefix("file:"))
        .unwrap_or(trimmed);
    PathBuf::from(path)
}
