use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    decode_handler, encode_handler, health_handler, list_handler, redirect_handler,
    redirect_root_handler, statistics_handler, statistics_root_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        // fixed routes all sit below /api/; a code never contains '/', so
        // none of them can shadow an issued code (including "api" itself)
        Router::new()
            .route("/api/health", get(health_handler))
            .route("/api/encode", post(encode_handler))
            .route("/api/decode", post(decode_handler))
            .route("/api/statistics", get(statistics_root_handler))
            .route("/api/statistics/", get(statistics_root_handler))
            .route("/api/statistics/{code}", get(statistics_handler))
            .route("/api/list", get(list_handler))
            .route("/", get(redirect_root_handler))
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
