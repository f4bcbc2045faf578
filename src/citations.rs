// src/citations.rs
//! Source URL extraction from a grounded model answer.
//!
//! Three strategies always run and are concatenated in this order:
//!   1. grounding metadata chunks on every candidate
//!   2. the flat `citations` list of older SDK shapes
//!   3. a URL scan over the answer text
//! The result is deduplicated (first occurrence wins) and capped.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::{array_items, field, non_empty_str, ModelResponse};

/// Maximum number of sources returned for one answer.
pub const SOURCE_CAP: usize = 20;

/// Key names tried, in order, on a legacy citation record.
const CITATION_KEYS: [&str; 3] = ["uri", "source", "url"];

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s)]+").expect("url regex"));

/// Extract the deduplicated, order-preserving source list. Never fails.
pub fn extract_citations(response: &ModelResponse) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    let grounded = grounding_uris(response);
    let legacy = legacy_citation_uris(response);
    let scanned = response.text().map(|t| text_uris(&t)).unwrap_or_default();

    tracing::debug!(
        grounded = grounded.len(),
        legacy = legacy.len(),
        scanned = scanned.len(),
        "citation strategies"
    );

    found.extend(grounded);
    found.extend(legacy);
    found.extend(scanned);

    let mut out = dedup_preserve_order(found);
    out.truncate(SOURCE_CAP);
    out
}

/// Strategy 1: `candidates[*].groundingMetadata.groundingChunks[*].web`.
pub fn grounding_uris(response: &ModelResponse) -> Vec<String> {
    response
        .candidates()
        .filter_map(|c| field(c, &["groundingMetadata", "grounding_metadata"]))
        .flat_map(|gm| array_items(field(gm, &["groundingChunks", "grounding_chunks"])))
        .filter_map(chunk_uri)
        .map(str::to_string)
        .collect()
}

/// Page URI of one grounding chunk, falling back to its site field.
fn chunk_uri(chunk: &Value) -> Option<&str> {
    let web = chunk.get("web")?;
    let page = web.get("page");

    non_empty_str(page.and_then(|p| p.get("uri")))
        .or_else(|| non_empty_str(web.get("uri")))
        .or_else(|| non_empty_str(page.and_then(|p| p.get("site"))))
        .or_else(|| non_empty_str(web.get("site")))
}

/// Strategy 2: first non-empty of `uri` / `source` / `url` per citation record.
pub fn legacy_citation_uris(response: &ModelResponse) -> Vec<String> {
    response
        .citations()
        .filter_map(|cit| {
            CITATION_KEYS
                .iter()
                .find_map(|k| non_empty_str(cit.get(*k)))
        })
        .map(str::to_string)
        .collect()
}

/// Strategy 3: every `http(s)://` run in free text, stopping at whitespace or `)`.
pub fn text_uris(text: &str) -> Vec<String> {
    RE_URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Keep the first occurrence of every non-empty URL.
pub fn dedup_preserve_order<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for u in urls {
        if u.is_empty() || !seen.insert(u.clone()) {
            continue;
        }
        out.push(u);
    }
    out
}
