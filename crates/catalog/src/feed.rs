//! Catalog feed loading.
//!
//! The feed is a JSON array of product records. A single bad record must not
//! blank the whole catalog: malformed entries are reported and skipped, and only
//! feed-level problems (not JSON, not an array) fail the load.

use std::collections::HashSet;

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, warn};

use trailhead_core::ProductId;

use crate::product::{Product, ProductRecord};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("catalog feed is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("catalog feed must be a JSON array of products, found {0}")]
    NotAnArray(&'static str),
}

/// Why a feed entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in the feed array.
    pub index: usize,
    /// The entry's `id`, when one could be read.
    pub id: Option<String>,
    pub reason: String,
}

/// Result of loading a feed: the valid products in feed order plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedEntry>,
}

/// Parse a JSON catalog feed.
pub fn load_json(feed: &str) -> Result<LoadedCatalog, FeedError> {
    let value: JsonValue = serde_json::from_str(feed)?;
    load_value(value)
}

/// Load a catalog from an already-parsed JSON document.
pub fn load_value(value: JsonValue) -> Result<LoadedCatalog, FeedError> {
    let entries = match value {
        JsonValue::Array(entries) => entries,
        other => return Err(FeedError::NotAnArray(json_kind(&other))),
    };
    Ok(load_entries(entries))
}

/// Validate raw entries one by one, keeping the good ones in order.
pub fn load_entries(entries: Vec<JsonValue>) -> LoadedCatalog {
    let mut loaded = LoadedCatalog::default();
    let mut seen: HashSet<ProductId> = HashSet::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let raw_id = entry
            .get("id")
            .and_then(JsonValue::as_str)
            .map(str::to_string);

        let product = serde_json::from_value::<ProductRecord>(entry)
            .map_err(|e| e.to_string())
            .and_then(|record| Product::try_from(record).map_err(|e| e.to_string()));

        match product {
            Ok(product) if seen.contains(product.id_typed()) => {
                warn!(index, id = %product.id_typed(), "skipping duplicate catalog entry");
                loaded.skipped.push(SkippedEntry {
                    index,
                    id: raw_id,
                    reason: "duplicate id".to_string(),
                });
            }
            Ok(product) => {
                seen.insert(product.id_typed().clone());
                loaded.products.push(product);
            }
            Err(reason) => {
                warn!(index, id = ?raw_id, %reason, "skipping malformed catalog entry");
                loaded.skipped.push(SkippedEntry {
                    index,
                    id: raw_id,
                    reason,
                });
            }
        }
    }

    debug!(
        loaded = loaded.products.len(),
        skipped = loaded.skipped.len(),
        "catalog feed loaded"
    );
    loaded
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Category;
    use trailhead_core::Money;

    const FEED: &str = r#"[
        {"id": "safari", "name": "Safari Tour", "type": "tour", "seats": 4, "deposit": 0,
         "prices": {"1h": 45}, "img": "/img/safari.jpg",
         "features": ["Guide"], "itinerary": ["Harbour", "Lighthouse"]},
        {"id": "quad", "name": "Quad", "type": "quad", "seats": 2, "deposit": 200,
         "prices": {"1h": 30, "24h": 200}, "happyHour1h": 20, "img": "/img/quad.jpg"},
        {"id": "broken", "name": "No prices", "type": "buggy", "seats": 2, "deposit": 0,
         "prices": {}, "img": "/img/broken.jpg"},
        {"id": "scooter", "name": "Scooter", "type": "scooter", "seats": 1, "deposit": 50,
         "prices": {"1h": 15}, "img": "/img/scooter.jpg"}
    ]"#;

    #[test]
    fn loads_valid_entries_in_order_and_skips_malformed() {
        let loaded = load_json(FEED).unwrap();
        let ids: Vec<&str> = loaded.products.iter().map(|p| p.id_typed().as_str()).collect();
        assert_eq!(ids, vec!["safari", "quad", "scooter"]);

        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].index, 2);
        assert_eq!(loaded.skipped[0].id.as_deref(), Some("broken"));
    }

    #[test]
    fn missing_required_field_is_skipped() {
        let feed = r#"[
            {"id": "a", "type": "quad", "seats": 2, "deposit": 0, "prices": {"1h": 10}, "img": ""},
            {"id": "b", "name": "B", "type": "quad", "seats": 2, "deposit": 0, "prices": {"1h": 10}, "img": ""}
        ]"#;
        let loaded = load_json(feed).unwrap();
        assert_eq!(loaded.products.len(), 1);
        assert_eq!(loaded.products[0].id_typed().as_str(), "b");
        assert!(loaded.skipped[0].reason.contains("name"));
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let feed = r#"[42, "quad", null]"#;
        let loaded = load_json(feed).unwrap();
        assert!(loaded.products.is_empty());
        assert_eq!(loaded.skipped.len(), 3);
        assert!(loaded.skipped.iter().all(|s| s.id.is_none()));
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let feed = r#"[
            {"id": "q", "name": "First", "type": "quad", "seats": 2, "deposit": 0, "prices": {"1h": 10}, "img": ""},
            {"id": "q", "name": "Second", "type": "quad", "seats": 2, "deposit": 0, "prices": {"1h": 12}, "img": ""}
        ]"#;
        let loaded = load_json(feed).unwrap();
        assert_eq!(loaded.products.len(), 1);
        assert_eq!(loaded.products[0].name(), "First");
        assert_eq!(loaded.skipped[0].reason, "duplicate id");
    }

    #[test]
    fn price_order_survives_loading() {
        let feed = r#"[
            {"id": "jeep", "name": "Jeep", "type": "jeep", "seats": 4, "deposit": 0,
             "prices": {"4h": 90, "1h": 35, "24h": 180}, "img": ""}
        ]"#;
        let loaded = load_json(feed).unwrap();
        let labels: Vec<&str> = loaded.products[0].prices().iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["4h", "1h", "24h"]);
        assert_eq!(loaded.products[0].prices().base_price(), Money::new(90));
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let loaded = load_json("[]").unwrap();
        assert!(loaded.products.is_empty());
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn feed_level_errors_fail_the_load() {
        match load_json("{not json") {
            Err(FeedError::InvalidJson(_)) => {}
            other => panic!("Expected InvalidJson, got {other:?}"),
        }
        match load_json(r#"{"products": []}"#) {
            Err(FeedError::NotAnArray("an object")) => {}
            other => panic!("Expected NotAnArray, got {other:?}"),
        }
    }

    #[test]
    fn categories_follow_type_tags() {
        let loaded = load_json(FEED).unwrap();
        let categories: Vec<Category> = loaded.products.iter().map(|p| p.category()).collect();
        assert_eq!(
            categories,
            vec![Category::Tour, Category::Rental, Category::Rental]
        );
    }
}
