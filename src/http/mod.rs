//! HTTP surface: the JSON API, the server-rendered page and static assets.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET/POST /api/folders` | list, create |
//! | `GET /api/folders/spiral` | spiral layout as JSON |
//! | `POST /api/folders/:id/view` | record one view |
//! | `GET/POST /api/cars` | list, create |
//! | `GET/PUT/DELETE /api/cars/:id` | fetch, patch, delete |
//! | `GET /api/health` | liveness |
//! | `POST /samples/folder`, `POST /samples/car` | sample buttons |
//! | `GET /spiral.svg`, `GET /spiral/open` | spiral image and clicks |
//! | anything else | the rendered page (static files first in production) |

mod cars;
mod folders;
mod health;
mod pages;
mod response;

pub use health::Health;
pub use pages::spiral_svg;
pub use response::{parse_body, ApiFailure, Operation};

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::AppState;

fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(folders::list_folders).post(folders::create_folder),
        )
        .route("/folders/spiral", get(folders::folder_spiral))
        .route("/folders/:id/view", post(folders::increment_view))
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/:id",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        )
        .route("/health", get(health::health))
}

fn app_router() -> Router<AppState> {
    Router::new()
        .nest("/api", api_router())
        .route("/samples/folder", post(pages::add_sample_folder))
        .route("/samples/car", post(pages::add_sample_car))
        .route("/spiral.svg", get(pages::spiral_image))
        .route("/spiral/open", get(pages::spiral_open))
}

/// Build the complete router for `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let config = state.config.clone();
    let app = app_router();

    let app = if config.mode.is_production() {
        // Built assets win over the page; the page renders for the rest.
        let assets = ServeDir::new(&config.client_dir)
            .append_index_html_on_directories(false)
            .fallback(get(pages::render_page).with_state(state.clone()));
        app.fallback_service(assets)
            .layer(CompressionLayer::new())
    } else {
        app.fallback(pages::render_page)
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    if config.base == "/" {
        app
    } else {
        Router::new().nest(config.base.trim_end_matches('/'), app)
    }
}

/// Serve until Ctrl-C.
pub async fn serve(state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(state.config.socket_addr()).await?;
    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = listener.local_addr()?;
    info!(
        mode = ?state.config.mode,
        base = %state.config.base,
        "Server started at http://{}",
        addr
    );

    let app = build_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
