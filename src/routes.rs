use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let static_dir = Path::new(&state.config.static_dir);
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let api = Router::new()
        .route("/catalog", get(handlers::catalog::get_catalog))
        .route("/bookings", post(handlers::bookings::open_booking))
        .route(
            "/bookings/:id",
            get(handlers::bookings::get_booking).delete(handlers::bookings::close),
        )
        .route("/bookings/:id/fields", put(handlers::bookings::set_field))
        .route("/bookings/:id/advance", post(handlers::bookings::advance))
        .route("/bookings/:id/retreat", post(handlers::bookings::retreat))
        .route("/bookings/:id/submit", post(handlers::bookings::submit))
        .route("/bookings/:id/open", post(handlers::bookings::reopen))
        .route("/chat", post(handlers::chat::open_chat))
        .route(
            "/chat/:id/messages",
            get(handlers::chat::get_messages).post(handlers::chat::post_message),
        )
        .route("/chat/:id/events", get(handlers::chat::events_stream))
        .route("/payments/signature", post(handlers::payments::signature))
        .fallback(api_not_found);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api)
        .with_state(state)
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn api_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "not found" })),
    )
}
