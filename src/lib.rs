// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod assemble;
pub mod blocks;
pub mod cache;
pub mod citations;
pub mod config;
pub mod gemini;
pub mod metrics;
pub mod model;
pub mod prompts;
pub mod scout;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::blocks::{parse_structured_blocks, Record};
pub use crate::cache::{Category, SourceCache};
pub use crate::citations::extract_citations;
pub use crate::model::ModelResponse;

use axum::Router;
use tracing::info;

use crate::config::GeminiConfig;
use crate::gemini::build_model_client;

/// Build the full in-process app: config, model client, fresh cache, API routes
/// and `/metrics`. Used by the binary and by tests (with `AI_TEST_MODE=mock`).
pub async fn app() -> anyhow::Result<Router> {
    let cfg = GeminiConfig::load_default()?;
    // Safe diagnostics: only model + key length
    info!(
        model = %cfg.model,
        key_len = cfg.api_key.len(),
        item_cap = cfg.item_cap,
        "gemini cfg loaded"
    );

    let client = build_model_client(&cfg)?;
    let metrics = crate::metrics::Metrics::init()?;
    let state = AppState::new(client, cfg.item_cap);

    Ok(api::router(state).merge(metrics.router()))
}
