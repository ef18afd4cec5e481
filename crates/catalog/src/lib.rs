//! Catalog domain module.
//!
//! This crate turns the externally supplied product feed into validated,
//! partitioned products and prices them against the viewer's local time.
//! Everything here is deterministic domain logic (no IO, no rendering).

pub mod booking;
pub mod feed;
pub mod partition;
pub mod pricing;
pub mod product;

pub use booking::{BookingIntent, ContactChannels, booking_message, category_message};
pub use feed::{FeedError, LoadedCatalog, SkippedEntry, load_entries, load_json, load_value};
pub use partition::{CatalogPartition, ProductGroup, partition, partition_shared};
pub use pricing::{
    HappyHour, PriceQuote, PriceRow, PriceUnit, PricingRules, duration_label, price, price_rows,
};
pub use product::{Category, FIRST_HOUR, PriceEntries, PriceTable, Product, ProductRecord};
