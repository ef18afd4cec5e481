use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use trailhead_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Duration label the discounted price is defined against.
pub const FIRST_HOUR: &str = "1h";

/// Catalog partition a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tour,
    Rental,
}

impl Category {
    /// The only `type` tag that marks a guided tour.
    pub const TOUR_TAG: &'static str = "tour";

    /// Everything that is not tagged as a tour is rented out.
    pub fn from_type_tag(tag: &str) -> Self {
        if tag == Self::TOUR_TAG {
            Category::Tour
        } else {
            Category::Rental
        }
    }

    pub fn is_tour(self) -> bool {
        self == Category::Tour
    }
}

/// Ordered duration-label → price entries, exactly as they appear in the feed.
///
/// JSON objects are unordered to most parsers, but the first entry is the
/// product's base price, so this visits the map in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceEntries(pub Vec<(String, Money)>);

impl<'de> Deserialize<'de> for PriceEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = PriceEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of duration labels to prices")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, price)) = map.next_entry::<String, Money>()? {
                    entries.push((label, price));
                }
                Ok(PriceEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for PriceEntries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, price) in &self.0 {
            map.serialize_entry(label, price)?;
        }
        map.end()
    }
}

/// Raw catalog record as supplied by the feed.
///
/// Nothing here is validated; convert with `Product::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub seats: u32,
    pub deposit: Money,
    pub prices: PriceEntries,
    #[serde(rename = "happyHour1h", default, skip_serializing_if = "Option::is_none")]
    pub happy_hour_1h: Option<Money>,
    pub img: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub itinerary: Vec<String>,
}

/// Validated, non-empty price table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    entries: Vec<(String, Money)>,
}

impl PriceTable {
    /// Build a price table, rejecting empty tables, blank labels and duplicates.
    pub fn new(entries: Vec<(String, Money)>) -> DomainResult<Self> {
        if entries.is_empty() {
            return Err(DomainError::validation("price table cannot be empty"));
        }
        for (i, (label, _)) in entries.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(DomainError::validation("price label cannot be empty"));
            }
            if entries[..i].iter().any(|(seen, _)| seen == label) {
                return Err(DomainError::validation(format!(
                    "duplicate price label: {label}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// First entry in feed order: the base/default duration price.
    pub fn base(&self) -> (&str, Money) {
        let (label, price) = &self.entries[0];
        (label.as_str(), *price)
    }

    pub fn base_price(&self) -> Money {
        self.entries[0].1
    }

    pub fn get(&self, label: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, price)| *price)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.entries.iter().map(|(label, price)| (label.as_str(), *price))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A validated catalog product. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    kind: String,
    category: Category,
    seats: u32,
    deposit: Money,
    prices: PriceTable,
    happy_hour_price: Option<Money>,
    image: String,
    features: Vec<String>,
    itinerary: Vec<String>,
}

impl Product {
    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw `type` tag from the feed (`"tour"`, `"quad"`, `"buggy"`, ...).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_tour(&self) -> bool {
        self.category.is_tour()
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }

    pub fn deposit(&self) -> Money {
        self.deposit
    }

    /// A zero deposit means none is collected.
    pub fn requires_deposit(&self) -> bool {
        !self.deposit.is_zero()
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Special first-hour price offered during happy hour, if any.
    pub fn happy_hour_price(&self) -> Option<Money> {
        self.happy_hour_price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn itinerary(&self) -> &[String] {
        &self.itinerary
    }

    /// "1 seat" / "4 seats".
    pub fn seat_label(&self) -> String {
        if self.seats == 1 {
            "1 seat".to_string()
        } else {
            format!("{} seats", self.seats)
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id)?;

        if record.name.trim().is_empty() {
            return Err(DomainError::validation(format!("{id}: name cannot be empty")));
        }

        if record.seats == 0 {
            return Err(DomainError::validation(format!("{id}: seats must be positive")));
        }

        let prices = PriceTable::new(record.prices.0)
            .map_err(|e| DomainError::validation(format!("{id}: {e}")))?;

        if record.happy_hour_1h.is_some() && prices.get(FIRST_HOUR).is_none() {
            return Err(DomainError::invariant(format!(
                "{id}: happy hour price requires a \"{FIRST_HOUR}\" price"
            )));
        }

        Ok(Self {
            category: Category::from_type_tag(&record.kind),
            id,
            name: record.name,
            kind: record.kind,
            seats: record.seats,
            deposit: record.deposit,
            prices,
            happy_hour_price: record.happy_hour_1h,
            image: record.img,
            features: record.features,
            itinerary: record.itinerary,
        })
    }
}
