// src/cache.rs
//! In-memory "latest sources per category" store.
//!
//! Lives as long as the `AppState` that owns it. Writes replace the whole list
//! for a category; reads clone a snapshot.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Fetch category. `ALL` fixes the iteration order used by aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Improvements,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::News, Category::Improvements];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Improvements => "improvements",
        }
    }
}

#[derive(Debug, Default)]
pub struct SourceCache {
    inner: RwLock<HashMap<Category, Vec<String>>>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored list for `category`.
    pub fn set(&self, category: Category, sources: Vec<String>) {
        metrics::gauge!("scout_cached_sources", "category" => category.as_str())
            .set(sources.len() as f64);
        let mut g = match self.inner.write() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        };
        g.insert(category, sources);
    }

    /// Snapshot of the stored list; empty if never written.
    pub fn get(&self, category: Category) -> Vec<String> {
        let g = match self.inner.read() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        };
        g.get(&category).cloned().unwrap_or_default()
    }
}
