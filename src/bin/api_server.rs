// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the crop and fertilizer tables
// Usage: cargo run --features api --bin api_server

use crop_advisor::data::{CROP_FILE, FERTILIZER_FILE};
use crop_advisor::{AppState, InputRanges, create_router};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "crop_advisor=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let data_dir = std::env::var("DATA_DIR")
        .unwrap_or_else(|_| "data".to_string());

    let crop_path = std::env::var("CROP_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(&data_dir).join(CROP_FILE));

    let fertilizer_path = std::env::var("FERTILIZER_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(&data_dir).join(FERTILIZER_FILE));

    let ranges = match std::env::var("RANGES_FILE") {
        Ok(path) => InputRanges::load(Path::new(&path))?,
        Err(_) => InputRanges::default(),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!("Configuration:");
    tracing::info!("  CROP_FILE: {:?}", crop_path);
    tracing::info!("  FERTILIZER_FILE: {:?}", fertilizer_path);
    tracing::info!("  PORT: {}", port);

    // Load tables (fails fast on missing files or columns)
    let state = AppState::new(&crop_path, &fertilizer_path, ranges).await?;
    tracing::info!("Application state initialized successfully");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
