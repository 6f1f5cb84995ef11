//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS (open, for browser
//! callers), request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Chat
        .route("/chat/message", post(handlers::chat::send_message))
        .route("/chat/history", get(handlers::chat::get_history))
        .route("/chat/clear", post(handlers::chat::clear_history))
        // Comment board
        .route(
            "/comments",
            get(handlers::comment::list_comments).post(handlers::comment::post_comment),
        )
        .route("/comments/{id}/like", post(handlers::comment::toggle_like));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
