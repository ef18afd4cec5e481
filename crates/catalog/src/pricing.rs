//! Time-based pricing.
//!
//! Prices depend on the viewer's local wall clock: during happy hour a product's
//! special first-hour price replaces its base price. Quotes are cheap and must
//! be recomputed on every query, never cached across renders.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use trailhead_core::{Clock, DomainError, DomainResult, Money, ValueObject};

use crate::product::{Category, FIRST_HOUR, Product};

/// Daily discount window `[start_hour, end_hour)` in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HappyHour {
    start_hour: u32,
    end_hour: u32,
}

impl HappyHour {
    /// 09:00 up to (not including) 12:00.
    pub const DEFAULT: HappyHour = HappyHour {
        start_hour: 9,
        end_hour: 12,
    };

    pub fn new(start_hour: u32, end_hour: u32) -> DomainResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(DomainError::validation(format!(
                "happy hour window must satisfy start < end <= 24 (got {start_hour}..{end_hour})"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Half-open: the start hour is inside the window, the end hour is not.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        let hour = now.hour();
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Banner text, e.g. "Happy Hour (9-12h)".
    pub fn label(&self) -> String {
        format!("Happy Hour ({}-{}h)", self.start_hour, self.end_hour)
    }
}

impl Default for HappyHour {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ValueObject for HappyHour {}

/// The price to show for a product at a given moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub display_price: Money,
    pub is_discounted: bool,
    /// Regular first-hour price, shown struck through while discounted.
    pub strike_price: Option<Money>,
}

impl ValueObject for PriceQuote {}

/// Pricing rules for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingRules {
    happy_hour: HappyHour,
}

impl PricingRules {
    pub fn new(happy_hour: HappyHour) -> Self {
        Self { happy_hour }
    }

    pub fn happy_hour(&self) -> HappyHour {
        self.happy_hour
    }

    /// Quote a product at `now`.
    pub fn quote(&self, product: &Product, now: NaiveDateTime) -> PriceQuote {
        match product.happy_hour_price() {
            Some(discounted) if self.happy_hour.is_active(now) => PriceQuote {
                display_price: discounted,
                is_discounted: true,
                strike_price: product.prices().get(FIRST_HOUR),
            },
            _ => PriceQuote {
                display_price: product.prices().base_price(),
                is_discounted: false,
                strike_price: None,
            },
        }
    }

    /// Quote a product at the clock's current time.
    pub fn quote_now(&self, product: &Product, clock: &dyn Clock) -> PriceQuote {
        self.quote(product, clock.now())
    }

    pub fn is_happy_hour(&self, clock: &dyn Clock) -> bool {
        self.happy_hour.is_active(clock.now())
    }
}

/// Quote a product under the default happy-hour window.
pub fn price(product: &Product, now: NaiveDateTime) -> PriceQuote {
    PricingRules::default().quote(product, now)
}

/// What a displayed price is charged per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceUnit {
    PerPerson,
    PerHour,
}

impl PriceUnit {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Tour => PriceUnit::PerPerson,
            Category::Rental => PriceUnit::PerHour,
        }
    }
}

impl core::fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PriceUnit::PerPerson => f.write_str("/person"),
            PriceUnit::PerHour => f.write_str("/hour"),
        }
    }
}

/// One line of a product's full price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    /// Label as it appears in the feed (`"24h"`).
    pub label: String,
    /// Label for display (`"24 hours"`).
    pub duration: String,
    pub price: Money,
}

/// Every price-table entry, in feed order, with display labels.
pub fn price_rows(product: &Product) -> Vec<PriceRow> {
    product
        .prices()
        .iter()
        .map(|(label, price)| PriceRow {
            label: label.to_string(),
            duration: duration_label(label),
            price,
        })
        .collect()
}

/// Human-readable duration for a price-table key.
///
/// `"24h"` reads as "24 hours", other `h`-suffixed keys are shown as-is and bare
/// numbers get an hour/hours suffix.
pub fn duration_label(key: &str) -> String {
    if key.contains("24h") {
        return "24 hours".to_string();
    }
    if key.contains('h') {
        return key.to_string();
    }
    let digits: String = key
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let plural = digits.parse::<u64>().map(|n| n > 1).unwrap_or(false);
    if plural {
        format!("{key} hours")
    } else {
        format!("{key} hour")
    }
}
