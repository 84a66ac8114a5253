pub mod speak;
pub mod stt;
pub mod translate;

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info_span;

use crate::state::AppState;

/// Audio uploads arrive as base64 JSON; allow up to 10 MB bodies
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    Router::new()
        .route("/api/translate", post(translate::translate))
        .route("/api/speak", post(speak::speak))
        .route("/api/stt", post(stt::transcribe))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
