use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::input::coerce_flag;
use crate::error::ValidationError;

/// A stored folder.
///
/// `views` only ever grows; it starts at 0 and is bumped by exactly one per
/// recorded view.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub views: i64,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated folder ready to be inserted. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFolder {
    pub name: String,
    pub url: Option<String>,
    pub is_private: bool,
}

/// Request body for `POST /api/folders`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<Value>,
}

impl FolderInput {
    /// Validate and coerce into an insertable folder.
    ///
    /// Views are never taken from the input; a new folder always starts at 0.
    pub fn validate(self) -> Result<NewFolder, ValidationError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ValidationError::MissingName),
        };

        Ok(NewFolder {
            name,
            url: self.url.filter(|url| !url.is_empty()),
            is_private: coerce_flag(self.is_private.as_ref()),
        })
    }
}
