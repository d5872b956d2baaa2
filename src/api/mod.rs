//! HTTP boundary: routes, handlers and error responses.

mod error;
mod search;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::finder::NeighborhoodFinder;

pub use search::{SearchQueryParams, SearchResponse};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Application state shared across handlers
pub struct AppState {
    /// `None` when no geocoding credential was configured at startup
    pub finder: Option<NeighborhoodFinder>,
    pub default_distance_km: i64,
    /// Upper bound on a single search, after which pending calls are dropped
    pub request_timeout: Duration,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/search", get(search::search_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Landing page with the search form
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    geocoder_configured: bool,
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let configured = state.finder.is_some();
    Json(HealthResponse {
        status: if configured { "ok" } else { "degraded" },
        geocoder_configured: configured,
    })
}
