use crate::hub::{HubHandle, HubStats};
use crate::signaling::ws_handler::ws_handler;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// `/ws` for signalling, `/health` for probes, and optionally a static
/// directory for everything else.
pub fn build_router(hub: HubHandle, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(cors).with_state(hub)
}

async fn health(State(hub): State<HubHandle>) -> Result<Json<HubStats>, StatusCode> {
    hub.stats()
        .await
        .map(Json)
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}
