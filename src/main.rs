//! Snake Pursuit WebSocket Server
//!
//! Single-player snake with pursuing enemies. The simulation runs here;
//! the browser only draws snapshots and sends key presses.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rust_embed::Embed;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod event_logger;
mod game;
mod outbox;
mod protocol;
mod scores;
mod state;
mod ws;

use config::SERVER_PORT;
use scores::Leaderboard;
use state::AppState;
use ws::ws_handler;

/// Embedded static files
#[derive(Embed)]
#[folder = "static/"]
struct Assets;

/// Serve embedded static files
async fn serve_static(path: &str) -> impl IntoResponse {
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [("content-type", mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Index page handler
async fn index_handler() -> impl IntoResponse {
    serve_static("index.html").await
}

/// Static file handler
async fn static_handler(
    axum::extract::Path(path): axum::extract::Path<String>,
) -> impl IntoResponse {
    serve_static(&path).await
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Persisted leaderboard
async fn scores_handler(State(state): State<Arc<AppState>>) -> Json<Leaderboard> {
    Json(state.ledger.load())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_pursuit=debug,tower_http=debug".into()),
        )
        .init();

    // Create shared state
    let state = Arc::new(AppState::new());
    info!(
        "Leaderboard loaded ({} entries) from {}/",
        state.ledger.load().len(),
        config::SCORE_STORE_DIR
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/ws/snake", get(ws_handler))
        .route("/health", get(health_handler))
        .route("/scores", get(scores_handler))
        .route("/{*path}", get(static_handler))
        .layer(cors)
        .with_state(state);

    // Start the server
    let addr = format!("0.0.0.0:{}", SERVER_PORT);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🐍 Snake server running on http://{}", addr);
    info!("   WebSocket endpoint: ws://localhost:{}/ws/snake", SERVER_PORT);
    info!(
        "   Tick {}ms, spawn every {}ms",
        config::TICK_DELAY_MS,
        config::SPAWN_INTERVAL_MS
    );

    axum::serve(listener, app).await?;
    Ok(())
}
