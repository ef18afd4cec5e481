//! Render-ready projections of catalog and selection state.
//!
//! These are rebuilt on every query; nothing here is stored by the session.

use std::sync::Arc;

use serde::Serialize;

use trailhead_catalog::{
    BookingIntent, Category, ContactChannels, FIRST_HOUR, HappyHour, PriceQuote, PriceRow,
    PriceUnit, Product, price_rows,
};
use trailhead_core::{Money, ProductId};

use crate::selection::NavigationState;

/// Rental cards list at most this many features.
pub const RENTAL_CARD_FEATURES: usize = 4;

/// Summary card in a catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub image: String,
    pub seats: String,
    pub features: Vec<String>,
    pub quote: PriceQuote,
    pub unit: PriceUnit,
    pub deposit: Option<Money>,
    pub booking_link: String,
}

impl ProductCard {
    pub fn build(product: &Product, quote: PriceQuote, contact: &ContactChannels) -> Self {
        let (features, intent) = match product.category() {
            Category::Tour => (product.features().to_vec(), BookingIntent::Book),
            Category::Rental => (
                product
                    .features()
                    .iter()
                    .take(RENTAL_CARD_FEATURES)
                    .cloned()
                    .collect(),
                BookingIntent::Rent,
            ),
        };

        Self {
            id: product.id_typed().clone(),
            name: product.name().to_string(),
            category: product.category(),
            image: product.image().to_string(),
            seats: product.seat_label(),
            features,
            quote,
            unit: PriceUnit::for_category(product.category()),
            deposit: product.requires_deposit().then(|| product.deposit()),
            booking_link: contact.booking_link(product, intent),
        }
    }

    /// Whether the card shows the "Happy Hour!" badge.
    pub fn shows_happy_hour_badge(&self) -> bool {
        self.quote.is_discounted
    }
}

/// Standing happy-hour offer shown in a product's price list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HappyHourOffer {
    pub label: String,
    pub price: Money,
    /// Regular first-hour price, struck through.
    pub regular_price: Option<Money>,
    /// Whether the window is open right now.
    pub active: bool,
}

/// Everything the detail overlay needs for the open product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    #[serde(skip)]
    pub product: Arc<Product>,
    pub quote: PriceQuote,
    pub navigation: NavigationState,
    pub unit: PriceUnit,
    pub price_rows: Vec<PriceRow>,
    pub happy_hour: Option<HappyHourOffer>,
    pub deposit: Option<Money>,
    pub booking_link: String,
    pub phone_link: String,
}

impl DetailView {
    pub fn build(
        product: Arc<Product>,
        quote: PriceQuote,
        navigation: NavigationState,
        window: HappyHour,
        window_open: bool,
        contact: &ContactChannels,
    ) -> Self {
        let happy_hour = product.happy_hour_price().map(|price| HappyHourOffer {
            label: window.label(),
            price,
            regular_price: product.prices().get(FIRST_HOUR),
            active: window_open,
        });

        Self {
            quote,
            navigation,
            unit: PriceUnit::for_category(product.category()),
            price_rows: price_rows(&product),
            happy_hour,
            deposit: product.requires_deposit().then(|| product.deposit()),
            booking_link: contact.booking_link(&product, BookingIntent::Book),
            phone_link: contact.phone_link(),
            product,
        }
    }

    /// Tours never show prev/next controls.
    pub fn shows_navigation(&self) -> bool {
        !self.product.is_tour() && (self.navigation.can_go_prev || self.navigation.can_go_next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use trailhead_catalog::{PriceEntries, PricingRules, ProductRecord};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn features(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("feature {i}")).collect()
    }

    fn buggy() -> Arc<Product> {
        Arc::new(
            Product::try_from(ProductRecord {
                id: "buggy".to_string(),
                name: "Beach Buggy".to_string(),
                kind: "buggy".to_string(),
                seats: 2,
                deposit: Money::new(300),
                prices: PriceEntries(vec![
                    ("1h".to_string(), Money::new(50)),
                    ("3h".to_string(), Money::new(120)),
                    ("24h".to_string(), Money::new(250)),
                ]),
                happy_hour_1h: Some(Money::new(35)),
                img: "/img/buggy.jpg".to_string(),
                features: features(6),
                ..ProductRecord::default()
            })
            .unwrap(),
        )
    }

    fn tour() -> Arc<Product> {
        Arc::new(
            Product::try_from(ProductRecord {
                id: "tour".to_string(),
                name: "Island Safari".to_string(),
                kind: "tour".to_string(),
                seats: 1,
                deposit: Money::ZERO,
                prices: PriceEntries(vec![("1h".to_string(), Money::new(45))]),
                img: "/img/tour.jpg".to_string(),
                features: features(6),
                itinerary: vec!["Harbour".to_string()],
                ..ProductRecord::default()
            })
            .unwrap(),
        )
    }

    #[test]
    fn rental_card_trims_features_and_shows_deposit() {
        let product = buggy();
        let quote = PricingRules::default().quote(&product, at(10));
        let card = ProductCard::build(&product, quote, &ContactChannels::default());

        assert_eq!(card.features.len(), RENTAL_CARD_FEATURES);
        assert_eq!(card.features[3], "feature 4");
        assert_eq!(card.deposit, Some(Money::new(300)));
        assert_eq!(card.unit, PriceUnit::PerHour);
        assert_eq!(card.seats, "2 seats");
        assert!(card.shows_happy_hour_badge());
        assert!(card.booking_link.contains("rent+Beach+Buggy"));
    }

    #[test]
    fn tour_card_keeps_every_feature() {
        let product = tour();
        let quote = PricingRules::default().quote(&product, at(10));
        let card = ProductCard::build(&product, quote, &ContactChannels::default());

        assert_eq!(card.features.len(), 6);
        assert_eq!(card.deposit, None);
        assert_eq!(card.unit, PriceUnit::PerPerson);
        assert_eq!(card.seats, "1 seat");
        assert!(!card.shows_happy_hour_badge());
        assert!(card.booking_link.contains("book+Island+Safari"));
    }

    #[test]
    fn detail_lists_prices_and_offer() {
        let product = buggy();
        let window = HappyHour::DEFAULT;
        let quote = PricingRules::new(window).quote(&product, at(14));
        let navigation = NavigationState {
            can_go_prev: true,
            can_go_next: true,
        };
        let detail = DetailView::build(
            product,
            quote,
            navigation,
            window,
            false,
            &ContactChannels::default(),
        );

        let durations: Vec<_> = detail.price_rows.iter().map(|r| r.duration.as_str()).collect();
        assert_eq!(durations, ["1h", "3h", "24 hours"]);
        assert_eq!(detail.quote.display_price, Money::new(50));
        assert_eq!(
            detail.happy_hour,
            Some(HappyHourOffer {
                label: "Happy Hour (9-12h)".to_string(),
                price: Money::new(35),
                regular_price: Some(Money::new(50)),
                active: false,
            })
        );
        assert!(detail.shows_navigation());
        assert_eq!(detail.phone_link, "tel:+385915555555");
    }

    #[test]
    fn tour_detail_never_shows_navigation() {
        let product = tour();
        let quote = PricingRules::default().quote(&product, at(10));
        let navigation = NavigationState {
            can_go_prev: true,
            can_go_next: true,
        };
        let detail = DetailView::build(
            product,
            quote,
            navigation,
            HappyHour::DEFAULT,
            true,
            &ContactChannels::default(),
        );
        assert!(!detail.shows_navigation());
        assert!(detail.happy_hour.is_none());
        assert_eq!(detail.deposit, None);
    }

    #[test]
    fn serialized_detail_omits_the_product_handle() {
        let product = buggy();
        let quote = PricingRules::default().quote(&product, at(14));
        let detail = DetailView::build(
            product,
            quote,
            NavigationState::default(),
            HappyHour::DEFAULT,
            false,
            &ContactChannels::default(),
        );
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("product").is_none());
        assert!(json.get("price_rows").is_some());
    }
}
