//! Outbound booking links (messaging deep links and phone dialer).

use url::form_urlencoded;

use trailhead_core::{DomainError, DomainResult};

use crate::product::{Category, Product};

const WHATSAPP_BASE: &str = "https://wa.me/";

/// What the visitor is asking for in a pre-filled message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingIntent {
    Book,
    Rent,
}

impl BookingIntent {
    fn verb(self) -> &'static str {
        match self {
            BookingIntent::Book => "book",
            BookingIntent::Rent => "rent",
        }
    }
}

/// Pre-filled message for a specific product.
pub fn booking_message(product_name: &str, intent: BookingIntent) -> String {
    format!("Hi! I'd like to {} {}.", intent.verb(), product_name)
}

/// Pre-filled message for a business line as a whole.
pub fn category_message(category: Category) -> &'static str {
    match category {
        Category::Tour => "Hi! I'd like to book a Safari Tour.",
        Category::Rental => "Hi! I'd like to rent a vehicle.",
    }
}

/// The business's contact number and the links derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChannels {
    phone: String,
}

impl ContactChannels {
    pub const DEFAULT_PHONE: &'static str = "385915555555";

    /// `phone` is an international number; a leading `+` and spaces are ignored.
    pub fn new(phone: &str) -> DomainResult<Self> {
        let digits: String = phone
            .trim()
            .trim_start_matches('+')
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "contact phone must be digits, got {phone:?}"
            )));
        }
        Ok(Self { phone: digits })
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Chat link without a pre-filled message.
    pub fn chat_link(&self) -> String {
        format!("{WHATSAPP_BASE}{}", self.phone)
    }

    /// Chat link with `message` pre-filled (form-encoded `text` parameter).
    pub fn chat_link_with(&self, message: &str) -> String {
        let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
        format!("{WHATSAPP_BASE}{}?text={text}", self.phone)
    }

    /// Chat link asking to book or rent a specific product.
    pub fn booking_link(&self, product: &Product, intent: BookingIntent) -> String {
        self.chat_link_with(&booking_message(product.name(), intent))
    }

    /// `tel:` link for the phone dialer.
    pub fn phone_link(&self) -> String {
        format!("tel:+{}", self.phone)
    }
}

impl Default for ContactChannels {
    fn default() -> Self {
        Self {
            phone: Self::DEFAULT_PHONE.to_string(),
        }
    }
}
