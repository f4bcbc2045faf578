// src/scout.rs
//! One fetch cycle: prompt → model → (records, sources) → cache + payload.

use anyhow::Result;
use tracing::info;

use crate::assemble::{assemble, FetchPayload};
use crate::blocks::{parse_structured_blocks, Record};
use crate::cache::{Category, SourceCache};
use crate::citations::extract_citations;
use crate::gemini::ModelClient;
use crate::model::ModelResponse;
use crate::prompts::prompt_for;

/// Parse records and extract sources from one answer. Never fails.
pub fn normalize(response: &ModelResponse) -> (Vec<Record>, Vec<String>) {
    let text = response.text().unwrap_or_default();
    let records = parse_structured_blocks(&text);
    let sources = extract_citations(response);
    (records, sources)
}

/// Ask the model for `category`, store the sources in `cache`, build the payload.
/// Only the model call can fail; on failure the cache is left untouched.
pub async fn run_fetch(
    model: &dyn ModelClient,
    cache: &SourceCache,
    category: Category,
    item_cap: usize,
) -> Result<FetchPayload> {
    let label = category.as_str();
    metrics::counter!("scout_fetch_total", "category" => label).increment(1);

    let response = match model.generate(prompt_for(category)).await {
        Ok(r) => r,
        Err(e) => {
            metrics::counter!("scout_fetch_errors_total", "category" => label).increment(1);
            return Err(e.context(format!("{label} fetch via {}", model.provider_name())));
        }
    };

    let (records, sources) = normalize(&response);
    metrics::counter!("scout_items_parsed_total", "category" => label)
        .increment(records.len() as u64);
    metrics::counter!("scout_sources_extracted_total", "category" => label)
        .increment(sources.len() as u64);
    info!(
        category = label,
        provider = model.provider_name(),
        records = records.len(),
        sources = sources.len(),
        "fetch normalized"
    );

    cache.set(category, sources.clone());
    Ok(assemble(records, sources, item_cap))
}
