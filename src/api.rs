use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::aggregator::Aggregator;
use crate::event::Event;
use crate::summary::{self, Stats, Summary};

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/events", get(events))
        .route("/api/summary", get(summary_view))
        .route("/api/stats", get(stats_view))
        .route("/api/health", get(health))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.aggregator.events().await)
}

async fn summary_view(State(state): State<AppState>) -> Json<Summary> {
    let events = state.aggregator.events().await;
    Json(summary::summarize(&events))
}

async fn stats_view(State(state): State<AppState>) -> Json<Stats> {
    let events = state.aggregator.events().await;
    Json(summary::stats(&events))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Backend MonSON en línea",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
    }))
}

/// Service descriptor for anyone landing on the root.
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Backend MonSON en línea",
        "endpoints": {
            "events": "/api/events",
            "summary": "/api/summary",
            "stats": "/api/stats",
            "health": "/api/health",
        },
    }))
}

/// Unexpected failures inside a handler surface as a generic JSON 500; no
/// partial-failure detail leaks to clients.
fn panic_response(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "Error interno del servidor" })),
    )
        .into_response()
}
