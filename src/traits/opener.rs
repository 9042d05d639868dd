//! Link opener trait abstraction.
//!
//! Picking a spiral node ends with "open this link in a new browsing
//! context". What that means depends on the host: a desktop viewer launches
//! the system browser, the HTTP surface answers with a redirect, and tests
//! just record the link.

/// Errors raised while opening a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenError {
    /// The host refused or failed to open the link.
    Failed(String),
    /// The link is not an absolute http(s) URL.
    Unsupported(String),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::Failed(msg) => write!(f, "Failed to open link: {}", msg),
            OpenError::Unsupported(link) => write!(f, "Unsupported link: {}", link),
        }
    }
}

impl std::error::Error for OpenError {}

/// Opens a node's destination link in a new browsing context.
pub trait LinkOpener: Send {
    /// Open `link`.
    fn open(&mut self, link: &str) -> Result<(), OpenError>;
}

/// Returns true for absolute http and https links.
pub fn is_web_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}
