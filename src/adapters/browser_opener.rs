//! Link openers for real hosts.

use tracing::info;

use crate::traits::{is_web_link, LinkOpener, OpenError};

/// Opens links in the system web browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOpener;

impl BrowserOpener {
    pub fn new() -> Self {
        Self
    }
}

impl LinkOpener for BrowserOpener {
    fn open(&mut self, link: &str) -> Result<(), OpenError> {
        if !is_web_link(link) {
            return Err(OpenError::Unsupported(link.to_string()));
        }
        webbrowser::open(link).map_err(|e| OpenError::Failed(e.to_string()))?;
        info!(link, "Opened link in browser");
        Ok(())
    }
}

/// Keeps the picked link so an HTTP handler can answer with a redirect.
#[derive(Debug, Clone, Default)]
pub struct RedirectOpener {
    target: Option<String>,
}

impl RedirectOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// The link to redirect to, if a node was picked.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }
}

impl LinkOpener for RedirectOpener {
    fn open(&mut self, link: &str) -> Result<(), OpenError> {
        if !is_web_link(link) {
            return Err(OpenError::Unsupported(link.to_string()));
        }
        self.target = Some(link.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_opener_rejects_non_web_links() {
        let mut opener = BrowserOpener::new();
        assert_eq!(
            opener.open("javascript:alert(1)"),
            Err(OpenError::Unsupported("javascript:alert(1)".to_string()))
        );
    }

    #[test]
    fn test_redirect_opener_keeps_last_link() {
        let mut opener = RedirectOpener::new();
        assert_eq!(opener.target(), None);
        opener.open("https://example.com/folder/1").unwrap();
        assert_eq!(opener.target(), Some("https://example.com/folder/1"));
        assert!(opener.open("file:///etc/passwd").is_err());
        assert_eq!(opener.target(), Some("https://example.com/folder/1"));
    }
}
