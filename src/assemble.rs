// src/assemble.rs
//! Response payloads for the fetch and aggregation endpoints.

use std::collections::HashSet;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::blocks::Record;
use crate::cache::{Category, SourceCache};

/// Records returned per fetch.
pub const DEFAULT_ITEM_CAP: usize = 5;
/// Upper bound accepted from configuration.
pub const MAX_ITEM_CAP: usize = 20;

/// Body of `/api/news` and `/api/improvements`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchPayload {
    pub generated_at: String,
    pub count: usize,
    pub items: Vec<Record>,
    pub sources: Vec<String>,
}

/// One entry of `/api/sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub url: String,
    pub from: Category,
}

/// Body of `/api/sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesPayload {
    pub generated_at: String,
    pub count: usize,
    pub sources: Vec<SourceRef>,
}

/// UTC now as ISO-8601 with a trailing `Z`, e.g. `2025-06-01T08:30:00.123456Z`.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Cap the records and wrap them with sources and a timestamp.
/// `count` reports the number of records actually returned.
pub fn assemble(mut records: Vec<Record>, sources: Vec<String>, cap: usize) -> FetchPayload {
    records.truncate(cap);
    FetchPayload {
        generated_at: utc_timestamp(),
        count: records.len(),
        items: records,
        sources,
    }
}

/// Flatten every category's latest sources in `Category::ALL` order,
/// keeping the first category seen for each URL.
pub fn aggregate_sources(cache: &SourceCache) -> SourcesPayload {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sources = Vec::new();

    for category in Category::ALL {
        for url in cache.get(category) {
            if seen.insert(url.clone()) {
                sources.push(SourceRef {
                    url,
                    from: category,
                });
            }
        }
    }

    SourcesPayload {
        generated_at: utc_timestamp(),
        count: sources.len(),
        sources,
    }
}
