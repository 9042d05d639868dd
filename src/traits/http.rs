//! HTTP client trait abstraction.
//!
//! The catalog API only speaks JSON, so the seam is one call: send an
//! [`ApiRequest`], get back the buffered [`ApiResponse`]. Status handling is
//! left to the caller; a 500 is still a response, not an [`HttpError`].

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The methods the catalog API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One call to the catalog API. A body is always JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json<T: Serialize>(url: impl Into<String>, value: &T) -> Result<Self, HttpError> {
        Self::with_json(Method::Post, url.into(), value)
    }

    pub fn put_json<T: Serialize>(url: impl Into<String>, value: &T) -> Result<Self, HttpError> {
        Self::with_json(Method::Put, url.into(), value)
    }

    fn with_json<T: Serialize>(method: Method, url: String, value: &T) -> Result<Self, HttpError> {
        let body = serde_json::to_string(value).map_err(|e| HttpError::Encode(e.to_string()))?;
        Ok(Self {
            method,
            url,
            body: Some(body),
        })
    }

    /// The body parsed back into JSON, if any.
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body.as_deref().and_then(|b| serde_json::from_str(b).ok())
    }
}

/// A buffered API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    /// A JSON response carrying `value`.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(serde_json::to_vec(value).unwrap_or_default()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|e| HttpError::Decode(e.to_string()))
    }

    /// The `error` field of a `{"error": ...}` body.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .map(|body| body.error)
    }
}

/// Transport-level failures. HTTP error statuses are not errors here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Could not encode request body: {0}")]
    Encode(String),

    #[error("Could not decode response body: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Other(String),
}

/// Sends catalog API requests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}
