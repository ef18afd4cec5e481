use std::sync::Arc;

use anyhow::Context;
use trailhead_core::SystemClock;
use trailhead_storefront::{Direction, Storefront, StorefrontConfig};

const ENV_CATALOG: &str = "TRAILHEAD_CATALOG";

fn main() -> anyhow::Result<()> {
    trailhead_observability::init();

    let path = std::env::var(ENV_CATALOG).unwrap_or_else(|_| {
        tracing::warn!("{ENV_CATALOG} not set; reading catalog.json");
        "catalog.json".to_string()
    });
    let feed = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;

    let config = StorefrontConfig::from_env().context("loading storefront config")?;
    let mut storefront = Storefront::open_feed(&feed, &config, Arc::new(SystemClock))
        .with_context(|| format!("loading catalog from {path}"))?;

    for skipped in storefront.skipped() {
        tracing::warn!(index = skipped.index, id = ?skipped.id, reason = %skipped.reason, "feed entry skipped");
    }

    if let Some(banner) = storefront.happy_hour_banner() {
        tracing::info!(%banner, "happy hour");
    }
    let hero = storefront.hero();
    tracing::info!(headline = hero.headline, subheadline = hero.subheadline, "hero");

    let preview = serde_json::json!({
        "tours": storefront.tour_cards(),
        "rentals": storefront.rental_cards(),
    });
    println!("{}", serde_json::to_string_pretty(&preview)?);

    let rentals = storefront.catalog().rentals().clone();
    if let Some(first) = rentals.get(0) {
        storefront.select(first.clone());
        for _ in 0..rentals.len() {
            if let Some(detail) = storefront.detail() {
                println!("{}", serde_json::to_string_pretty(&detail)?);
            }
            storefront.navigate(Direction::Next);
        }
    }

    storefront.shutdown();
    Ok(())
}
