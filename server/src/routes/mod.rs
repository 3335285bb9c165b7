//! Router assembly

pub mod analyze;
pub mod chat;
pub mod export;
pub mod generate;
pub mod ping;
pub mod preview;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::constants::limits;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/cron/ping", get(ping::ping))
        .route("/api/generate", post(generate::generate))
        .route("/api/chat", post(chat::chat))
        .route("/api/analyze", post(analyze::analyze))
        .route(
            "/api/preview",
            get(preview::current).post(preview::render).delete(preview::clear),
        )
        .route("/api/export", post(export::export))
        .layer(DefaultBodyLimit::max(limits::MAX_BODY_BYTES))
        .layer(cors)
        .with_state(state)
}
