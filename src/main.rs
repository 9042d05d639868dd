use fibex::adapters::{ApiSource, BrowserOpener, ReqwestHttpClient, SqliteStore};
use fibex::config::{ServerConfig, DEFAULT_LOG_FILTER};
use fibex::http::{serve, spiral_svg};
use fibex::render::{PageRenderer, INDEX_HTML};
use fibex::services::AppState;
use fibex::spiral::{inputs_from_folders, EventOutcome, SceneEvent, SceneSession, SvgSurface};
use fibex::telemetry::init_tracing;
use fibex::traits::{CatalogSource, CatalogStore};
use fibex::ui::{Shell, SpiralView};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::sync::Arc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage:
  fibex                               serve the catalog (configured from the environment)
  fibex snapshot <base-url>           print the page rendered from a running server
  fibex open <base-url> <x> <y> [w]   click the spiral at pixel (x, y) and open the hit
  fibex --version";

fn source_for(base_url: &str) -> ApiSource<ReqwestHttpClient> {
    ApiSource::new(ReqwestHttpClient::new(), base_url)
}

fn parse_number(raw: Option<&String>, name: &str) -> Result<f64> {
    let raw = raw.ok_or_else(|| eyre!("missing <{}>\n\n{}", name, USAGE))?;
    raw.parse()
        .wrap_err_with(|| format!("<{}> must be a number, got '{}'", name, raw))
}

/// Handle `snapshot <base-url>`: render the page from a remote server, with
/// the spiral inlined.
async fn snapshot_command(base_url: &str) -> Result<()> {
    let mut shell = Shell::new(source_for(base_url));
    let state = shell.load().await.clone();

    let spiral = spiral_svg(&state.folders.items, fibex::spiral::DEFAULT_VIEWPORT_WIDTH)?;
    let renderer = PageRenderer::with_template(INDEX_HTML, "/");
    let html = renderer
        .render_document("/", &state, &SpiralView::Inline(spiral))
        .await?;
    println!("{}", html);
    Ok(())
}

/// Handle `open <base-url> <x> <y> [width]`.
async fn open_command(args: &[String]) -> Result<()> {
    let base_url = args.first().ok_or_else(|| eyre!("missing <base-url>\n\n{}", USAGE))?;
    let x = parse_number(args.get(1), "x")?;
    let y = parse_number(args.get(2), "y")?;
    let width = match args.get(3) {
        Some(_) => parse_number(args.get(3), "width")?,
        None => fibex::spiral::DEFAULT_VIEWPORT_WIDTH,
    };

    let folders = source_for(base_url)
        .list_folders()
        .await
        .wrap_err("Failed to load folders")?;

    let mut session = SceneSession::new(SvgSurface::new(), BrowserOpener::new());
    session.start(&inputs_from_folders(&folders), width)?;
    match session.dispatch(SceneEvent::Click { x, y })? {
        EventOutcome::Opened { folder_id, link } => {
            println!("Opened folder {} at {}", folder_id, link);
        }
        _ => println!("No folder at ({}, {})", x, y),
    }
    session.dispose();
    Ok(())
}

/// Default mode: serve until Ctrl-C, then close the store.
async fn serve_command(config: ServerConfig) -> Result<()> {
    let store = Arc::new(
        SqliteStore::open(&config.database_path)
            .wrap_err_with(|| format!("Failed to open {}", config.database_path.display()))?,
    );
    let renderer = PageRenderer::new(&config)?;
    let state = AppState::new(store.clone(), renderer, config);

    let served = serve(state).await;
    store.close().await?;
    served.wrap_err("Server failed")
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // Handle --version flag before any initialization
    if args.iter().any(|arg| arg == "--version") {
        println!("fibex {}", VERSION);
        std::process::exit(0);
    }
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", USAGE);
        std::process::exit(0);
    }

    color_eyre::install()?;

    let runtime = tokio::runtime::Runtime::new()?;

    // Only the server reads PORT/HOST/BASE; the client commands ignore them.
    match args.first().map(String::as_str) {
        Some("snapshot") => {
            init_tracing(DEFAULT_LOG_FILTER);
            let base_url = args
                .get(1)
                .ok_or_else(|| eyre!("missing <base-url>\n\n{}", USAGE))?;
            runtime.block_on(snapshot_command(base_url))
        }
        Some("open") => {
            init_tracing(DEFAULT_LOG_FILTER);
            runtime.block_on(open_command(&args[1..]))
        }
        Some(other) => Err(eyre!("unknown command '{}'\n\n{}", other, USAGE)),
        None => {
            let config = ServerConfig::from_env()?;
            init_tracing(&config.log_filter);
            runtime.block_on(serve_command(config))
        }
    }
}
