// tests/sources_aggregate.rs
use foundry_scout::assemble::{aggregate_sources, SourceRef};
use foundry_scout::{Category, SourceCache};

fn urls(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn first_category_wins_for_shared_url() {
    let cache = SourceCache::new();
    // Write order must not matter; iteration follows news, improvements.
    cache.set(Category::Improvements, urls(&["u2", "u3"]));
    cache.set(Category::News, urls(&["u1", "u2"]));

    let p = aggregate_sources(&cache);
    assert_eq!(p.count, 3);
    assert_eq!(
        p.sources,
        vec![
            SourceRef { url: "u1".into(), from: Category::News },
            SourceRef { url: "u2".into(), from: Category::News },
            SourceRef { url: "u3".into(), from: Category::Improvements },
        ]
    );
    assert!(p.generated_at.ends_with('Z'));
}

#[test]
fn empty_cache_aggregates_to_nothing() {
    let p = aggregate_sources(&SourceCache::new());
    assert_eq!(p.count, 0);
    assert!(p.sources.is_empty());
}

#[test]
fn aggregation_has_no_side_effects() {
    let cache = SourceCache::new();
    cache.set(Category::News, urls(&["a"]));
    let _ = aggregate_sources(&cache);
    let _ = aggregate_sources(&cache);
    assert_eq!(cache.get(Category::News), urls(&["a"]));
    assert!(cache.get(Category::Improvements).is_empty());
}
