//! Server-rendered page, sample buttons and the spiral image.
//!
//! Clicking the spiral image submits its pixel coordinates to
//! `/spiral/open`, which runs the same camera and picking as any other
//! scene session and redirects to the picked folder's link.

use axum::extract::{OriginalUri, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{debug, error, warn};

use super::response::{ApiFailure, Operation};
use crate::adapters::RedirectOpener;
use crate::models::Folder;
use crate::services::AppState;
use crate::spiral::{
    inputs_from_folders, EventOutcome, SceneEvent, SceneSession, SessionError, SvgSurface,
    DEFAULT_VIEWPORT_WIDTH,
};
use crate::ui::{random_choice, Shell, SpiralView};

/// Narrowest and widest spiral the page will ask for.
const MIN_PAGE_WIDTH: f64 = 240.0;
const MAX_PAGE_WIDTH: f64 = 4096.0;

/// Spiral width for a page request; `?width=` lets the client match its container.
pub fn page_spiral_width(requested: Option<f64>) -> f64 {
    match requested {
        Some(width) if width.is_finite() => width.clamp(MIN_PAGE_WIDTH, MAX_PAGE_WIDTH),
        _ => DEFAULT_VIEWPORT_WIDTH,
    }
}

/// Render the page for any path that is not an API route.
pub async fn render_page(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Option<Query<SpiralParams>>,
) -> Response {
    let mut shell = Shell::new(state.source());
    shell.load().await;

    let requested = params.and_then(|Query(p)| p.width);
    let view = SpiralView::Linked {
        width: page_spiral_width(requested),
    };
    match state
        .renderer
        .render_document(uri.path(), shell.state(), &view)
        .await
    {
        Ok(html) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, path = %uri.path(), "Failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

pub async fn add_sample_folder(State(state): State<AppState>) -> Redirect {
    let mut shell = Shell::new(state.source());
    shell.load().await;
    // Failures are logged by the shell; the page shows the unchanged list.
    let _ = shell.add_sample_folder().await;
    Redirect::to(&state.config.base)
}

pub async fn add_sample_car(State(state): State<AppState>) -> Redirect {
    let mut shell = Shell::new(state.source());
    let _ = shell.add_sample_car(random_choice()).await;
    Redirect::to(&state.config.base)
}

#[derive(Debug, Default, Deserialize)]
pub struct SpiralParams {
    #[serde(default)]
    pub width: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
}

/// Render the folder spiral as one SVG frame.
pub fn spiral_svg(folders: &[Folder], width: f64) -> Result<String, SessionError> {
    let mut session = SceneSession::new(SvgSurface::new(), RedirectOpener::new());
    session.start(&inputs_from_folders(folders), width)?;
    session.frame()?;
    Ok(session.surface_mut().take_document().unwrap_or_default())
}

pub async fn spiral_image(
    State(state): State<AppState>,
    Query(params): Query<SpiralParams>,
) -> Response {
    let folders = match state.folders.list().await {
        Ok(folders) => folders,
        Err(e) => return ApiFailure::from_error(Operation::ListFolders, &e).into_response(),
    };

    match spiral_svg(&folders, params.width.unwrap_or(DEFAULT_VIEWPORT_WIDTH)) {
        Ok(svg) => (
            [
                (header::CONTENT_TYPE, "image/svg+xml"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            svg,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render spiral");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render spiral").into_response()
        }
    }
}

/// Resolve a click on the spiral image. A hit counts as one view.
pub async fn spiral_open(
    State(state): State<AppState>,
    Query(params): Query<ClickParams>,
) -> Response {
    let folders = match state.folders.list().await {
        Ok(folders) => folders,
        Err(e) => return ApiFailure::from_error(Operation::ListFolders, &e).into_response(),
    };

    let outcome = {
        let width = params.width.unwrap_or(DEFAULT_VIEWPORT_WIDTH);
        let mut session = SceneSession::new(SvgSurface::new(), RedirectOpener::new());
        let outcome = session
            .start(&inputs_from_folders(&folders), width)
            .and_then(|_| {
                session.dispatch(SceneEvent::Click {
                    x: params.x,
                    y: params.y,
                })
            });
        outcome
    };

    match outcome {
        Ok(EventOutcome::Opened { folder_id, link }) => {
            // Folder urls are stored as given; not every one is a valid header.
            let location = match HeaderValue::try_from(link.as_str()) {
                Ok(location) => location,
                Err(e) => {
                    warn!(folder_id, link = ?link, error = %e, "Folder link is not a valid redirect target");
                    return StatusCode::NO_CONTENT.into_response();
                }
            };
            if let Err(e) = state.folders.increment_view_by_id(folder_id).await {
                warn!(folder_id, error = %e, "Failed to record folder view");
            }
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
        Ok(other) => {
            debug!(x = params.x, y = params.y, outcome = ?other, "Spiral click missed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            warn!(error = %e, "Spiral click failed");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
