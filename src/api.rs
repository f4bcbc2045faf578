use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing::warn;

use crate::assemble::{aggregate_sources, SourcesPayload};
use crate::cache::{Category, SourceCache};
use crate::gemini::DynModelClient;
use crate::scout;

/// Directory with the HTML pages served for non-API paths.
pub const STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppState {
    pub model: DynModelClient,
    pub cache: Arc<SourceCache>,
    pub item_cap: usize,
}

impl AppState {
    pub fn new(model: DynModelClient, item_cap: usize) -> Self {
        Self {
            model,
            cache: Arc::new(SourceCache::new()),
            item_cap,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/news", get(api_news))
        .route("/api/improvements", get(api_improvements))
        .route("/api/sources", get(api_sources))
        .route_service("/news", page("news.html"))
        .route_service("/improvements", page("improvements.html"))
        .route_service("/sources", page("sources.html"))
        .fallback_service(ServeDir::new(STATIC_DIR))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

fn page(file: &str) -> ServeFile {
    ServeFile::new(std::path::Path::new(STATIC_DIR).join(file))
}

async fn api_news(State(state): State<AppState>) -> Response {
    fetch_response(&state, Category::News).await
}

async fn api_improvements(State(state): State<AppState>) -> Response {
    fetch_response(&state, Category::Improvements).await
}

/// Latest sources seen by the two fetch endpoints. Never calls the model.
async fn api_sources(State(state): State<AppState>) -> Json<SourcesPayload> {
    Json(aggregate_sources(&state.cache))
}

async fn fetch_response(state: &AppState, category: Category) -> Response {
    match scout::run_fetch(state.model.as_ref(), &state.cache, category, state.item_cap).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => {
            let msg = format!("{e:#}");
            warn!(error = %msg, category = category.as_str(), "model fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": msg })),
            )
                .into_response()
        }
    }
}
