//! Server-side page rendering.
//!
//! There is exactly one template source per mode:
//!
//! - **Development**: the template file is re-read on every request, so edits
//!   show up without a restart.
//! - **Production**: `<client dir>/index.html` is read once at startup.
//!
//! Either way a missing file falls back to the embedded [`INDEX_HTML`].

mod template;

pub use template::{HEAD_PLACEHOLDER, HTML_PLACEHOLDER, INDEX_HTML};

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{RenderMode, ServerConfig};
use crate::ui::{page_head, render_shell, ShellState, SpiralView};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

/// The two fragments spliced into the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub head: String,
    pub html: String,
}

#[derive(Debug, Clone)]
enum TemplateSource {
    /// Re-read from this path per request.
    Live(PathBuf),
    /// Loaded once.
    Cached(String),
}

#[derive(Debug, Clone)]
pub struct PageRenderer {
    source: TemplateSource,
    base: String,
}

impl PageRenderer {
    /// Build the renderer for the configured mode.
    ///
    /// In production this reads the template right away.
    pub fn new(config: &ServerConfig) -> Result<Self, RenderError> {
        let source = match config.mode {
            RenderMode::Development => TemplateSource::Live(config.template_path.clone()),
            RenderMode::Production => {
                let path = config.client_dir.join("index.html");
                let template = match std::fs::read_to_string(&path) {
                    Ok(template) => template,
                    Err(e) => fallback(&path, e)?,
                };
                TemplateSource::Cached(template)
            }
        };
        Ok(Self {
            source,
            base: config.base.clone(),
        })
    }

    /// A renderer over a fixed template, whatever the mode.
    pub fn with_template(template: impl Into<String>, base: &str) -> Self {
        Self {
            source: TemplateSource::Cached(template.into()),
            base: base.to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the application fragments for `url`.
    pub fn render(&self, url: &str, state: &ShellState, spiral: &SpiralView) -> RenderedPage {
        debug!(route = %self.route(url), "Rendering page");
        RenderedPage {
            head: page_head(),
            html: render_shell(state, &self.base, spiral),
        }
    }

    /// Render a complete HTML document for `url`.
    pub async fn render_document(
        &self,
        url: &str,
        state: &ShellState,
        spiral: &SpiralView,
    ) -> Result<String, RenderError> {
        let template = self.template().await?;
        let rendered = self.render(url, state, spiral);
        apply_template(&template, &rendered)
    }

    /// The request path relative to the base path.
    pub fn route<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(self.base.as_str())
            .or_else(|| url.strip_prefix(self.base.trim_end_matches('/')))
            .unwrap_or(url)
    }

    async fn template(&self) -> Result<String, RenderError> {
        match &self.source {
            TemplateSource::Cached(template) => Ok(template.clone()),
            TemplateSource::Live(path) => match tokio::fs::read_to_string(path).await {
                Ok(template) => Ok(template),
                Err(e) => fallback(path, e),
            },
        }
    }
}

/// Use the embedded template when the file does not exist.
fn fallback(path: &Path, err: io::Error) -> Result<String, RenderError> {
    if err.kind() == io::ErrorKind::NotFound {
        warn!(path = %path.display(), "Template not found, using built-in template");
        Ok(INDEX_HTML.to_string())
    } else {
        Err(RenderError::Template {
            path: path.to_path_buf(),
            source: err,
        })
    }
}

/// Splice rendered fragments into a template.
///
/// The head placeholder is optional; the html placeholder is not.
pub fn apply_template(template: &str, rendered: &RenderedPage) -> Result<String, RenderError> {
    if !template.contains(HTML_PLACEHOLDER) {
        return Err(RenderError::MissingPlaceholder(HTML_PLACEHOLDER));
    }
    Ok(template
        .replacen(HEAD_PLACEHOLDER, &rendered.head, 1)
        .replacen(HTML_PLACEHOLDER, &rendered.html, 1))
}
