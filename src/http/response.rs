//! Error responses and request body parsing for the JSON API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error};

use crate::error::{CatalogError, ErrorCategory, ValidationError};

/// The API operations, each with the fixed message shown when storage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListFolders,
    CreateFolder,
    IncrementView,
    ListCars,
    GetCar,
    CreateCar,
    UpdateCar,
    DeleteCar,
}

impl Operation {
    /// Static message for server-side failures.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::ListFolders => "Failed to fetch folders",
            Operation::CreateFolder => "Failed to create folder",
            Operation::IncrementView => "Failed to update view count",
            Operation::ListCars => "Failed to fetch cars",
            Operation::GetCar => "Failed to fetch car",
            Operation::CreateCar => "Failed to create car",
            Operation::UpdateCar => "Failed to update car",
            Operation::DeleteCar => "Failed to delete car",
        }
    }

    /// Only a single-car lookup reports a missing record as 404. Elsewhere
    /// a missing record is a storage failure.
    fn reports_not_found(&self) -> bool {
        matches!(self, Operation::GetCar)
    }
}

/// An error response with a `{"error": message}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a service error for `op`, logging anything that is not the
    /// client's fault.
    pub fn from_error(op: Operation, err: &CatalogError) -> Self {
        match err.category() {
            ErrorCategory::Validation => {
                debug!(code = err.error_code(), error = %err, "Rejected request");
                Self::new(StatusCode::BAD_REQUEST, err.user_message())
            }
            ErrorCategory::NotFound if op.reports_not_found() => {
                Self::new(StatusCode::NOT_FOUND, err.user_message())
            }
            _ => {
                error!(code = err.error_code(), error = %err, "{}", op.failure_message());
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, op.failure_message())
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Decode a JSON request body. An empty body reads as `{}`.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ValidationError> {
    let raw: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(raw).map_err(|e| ValidationError::MalformedBody {
        message: e.to_string(),
    })
}
