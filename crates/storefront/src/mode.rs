//! Which business line the site currently advertises.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use trailhead_catalog::{Category, category_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Tour,
    Rent,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Tour => DisplayMode::Rent,
            DisplayMode::Rent => DisplayMode::Tour,
        }
    }

    /// Catalog section this mode promotes.
    pub fn category(self) -> Category {
        match self {
            DisplayMode::Tour => Category::Tour,
            DisplayMode::Rent => Category::Rental,
        }
    }

    pub fn hero(self) -> HeroContent {
        match self {
            DisplayMode::Tour => HeroContent {
                headline: "Guided Safari Tours",
                subheadline: "Discover Vir's hidden gems in 1 hour",
                chat_message: category_message(Category::Tour),
            },
            DisplayMode::Rent => HeroContent {
                headline: "Rent & Ride Free",
                subheadline: "Quads, buggies, scooters & more",
                chat_message: category_message(Category::Rental),
            },
        }
    }
}

/// Headline copy for the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeroContent {
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub chat_message: &'static str,
}

/// Display mode shared between the session and its rotation task.
#[derive(Debug, Clone, Default)]
pub struct SharedMode(Arc<Mutex<DisplayMode>>);

impl SharedMode {
    pub fn new(mode: DisplayMode) -> Self {
        Self(Arc::new(Mutex::new(mode)))
    }

    pub fn get(&self) -> DisplayMode {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, mode: DisplayMode) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Flip the mode and return the new value.
    pub fn toggle(&self) -> DisplayMode {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = guard.toggled();
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_alternates() {
        assert_eq!(DisplayMode::Tour.toggled(), DisplayMode::Rent);
        assert_eq!(DisplayMode::Rent.toggled(), DisplayMode::Tour);
    }

    #[test]
    fn modes_map_to_categories() {
        assert_eq!(DisplayMode::Tour.category(), Category::Tour);
        assert_eq!(DisplayMode::Rent.category(), Category::Rental);
    }

    #[test]
    fn hero_copy_follows_mode() {
        assert_eq!(DisplayMode::Tour.hero().headline, "Guided Safari Tours");
        assert_eq!(
            DisplayMode::Rent.hero().chat_message,
            "Hi! I'd like to rent a vehicle."
        );
    }

    #[test]
    fn shared_mode_is_shared() {
        let mode = SharedMode::new(DisplayMode::Tour);
        let other = mode.clone();
        assert_eq!(other.toggle(), DisplayMode::Rent);
        assert_eq!(mode.get(), DisplayMode::Rent);
        mode.set(DisplayMode::Tour);
        assert_eq!(other.get(), DisplayMode::Tour);
    }
}
