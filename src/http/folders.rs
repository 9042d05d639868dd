//! `/api/folders` handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;
use serde::Deserialize;

use super::response::{parse_body, ApiFailure, Operation};
use crate::error::CatalogError;
use crate::models::FolderInput;
use crate::services::AppState;
use crate::spiral::{inputs_from_folders, SpiralLayout};

pub async fn list_folders(State(state): State<AppState>) -> Response {
    match state.folders.list().await {
        Ok(folders) => Json(folders).into_response(),
        Err(e) => ApiFailure::from_error(Operation::ListFolders, &e).into_response(),
    }
}

pub async fn create_folder(State(state): State<AppState>, body: Bytes) -> Response {
    let input: FolderInput = match parse_body(&body) {
        Ok(input) => input,
        Err(e) => {
            return ApiFailure::from_error(Operation::CreateFolder, &CatalogError::from(e))
                .into_response()
        }
    };

    match state.folders.create(input).await {
        Ok(folder) => (StatusCode::CREATED, Json(folder)).into_response(),
        Err(e) => ApiFailure::from_error(Operation::CreateFolder, &e).into_response(),
    }
}

pub async fn increment_view(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.folders.increment_view(&id).await {
        Ok(folder) => Json(folder).into_response(),
        Err(e) => ApiFailure::from_error(Operation::IncrementView, &e).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SpiralQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// The spiral placement of the current folder list, for client-side renderers.
pub async fn folder_spiral(
    State(state): State<AppState>,
    Query(query): Query<SpiralQuery>,
) -> Response {
    match state.folders.list().await {
        Ok(folders) => {
            let mut inputs = inputs_from_folders(&folders);
            if let Some(limit) = query.limit {
                inputs.truncate(limit);
            }
            Json(SpiralLayout::build(&inputs)).into_response()
        }
        Err(e) => ApiFailure::from_error(Operation::ListFolders, &e).into_response(),
    }
}
