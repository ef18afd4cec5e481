//! Detail-view selection and cyclic navigation.
//!
//! ```text
//!   Closed ──select──► Open(product, group) ──navigate(prev|next)──┐
//!     ▲                    │        ▲                              │
//!     └──────close─────────┘        └──────────────────────────────┘
//! ```
//!
//! Tours open in a group of their own and never navigate. Rentals open in the
//! full rental group and wrap around in both directions.

use core::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use trailhead_catalog::{CatalogPartition, Category, Product, ProductGroup};
use trailhead_core::{DomainError, Entity};

/// Navigation request from the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Direction::Prev),
            "next" => Ok(Direction::Next),
            other => Err(DomainError::validation(format!(
                "unknown navigation direction: {other:?}"
            ))),
        }
    }
}

/// Which product the detail view shows, and the group it was opened from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Closed,
    Open {
        product: Arc<Product>,
        group: ProductGroup,
    },
}

/// Navigation affordances for the detail view. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct NavigationState {
    pub can_go_prev: bool,
    pub can_go_next: bool,
}

/// Owns the single open-product slot of a session.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    rentals: ProductGroup,
    state: Selection,
}

impl SelectionController {
    /// `rentals` is the navigation domain for every rental selection.
    pub fn new(rentals: ProductGroup) -> Self {
        Self {
            rentals,
            state: Selection::Closed,
        }
    }

    pub fn from_partition(partition: &CatalogPartition) -> Self {
        Self::new(partition.rentals().clone())
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn open_product(&self) -> Option<&Arc<Product>> {
        match &self.state {
            Selection::Open { product, .. } => Some(product),
            Selection::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, Selection::Open { .. })
    }

    /// Open `product` in the detail view, replacing whatever was open.
    ///
    /// The product does not have to be part of the rental group; navigation
    /// from such a product starts over at the group's ends.
    pub fn select(&mut self, product: Arc<Product>) {
        let group = match product.category() {
            Category::Tour => ProductGroup::single(product.clone()),
            Category::Rental => self.rentals.clone(),
        };
        debug!(product = %product.id(), group_len = group.len(), "detail view opened");
        self.state = Selection::Open { product, group };
    }

    /// Move to the previous or next product of the active group.
    ///
    /// Returns whether the open product changed. Closed selections and groups
    /// with fewer than two products are left untouched.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Selection::Open { product, group } = &self.state else {
            return false;
        };
        let len = group.len();
        if len <= 1 {
            return false;
        }

        let target = match (group.position(product.id()), direction) {
            (Some(i), Direction::Next) => (i + 1) % len,
            (Some(i), Direction::Prev) => (i + len - 1) % len,
            (None, Direction::Next) => 0,
            (None, Direction::Prev) => len - 1,
        };

        let Some(next) = group.get(target).cloned() else {
            return false;
        };
        debug!(from = %product.id(), to = %next.id(), ?direction, "detail view navigated");
        let group = group.clone();
        self.state = Selection::Open {
            product: next,
            group,
        };
        true
    }

    /// Navigate using a raw direction value from the UI; unknown values do nothing.
    pub fn navigate_raw(&mut self, direction: &str) -> bool {
        match direction.parse::<Direction>() {
            Ok(direction) => self.navigate(direction),
            Err(e) => {
                debug!(error = %e, "ignoring navigation request");
                false
            }
        }
    }

    /// Dismiss the detail view. Idempotent.
    pub fn close(&mut self) {
        if let Selection::Open { product, .. } = &self.state {
            debug!(product = %product.id(), "detail view closed");
        }
        self.state = Selection::Closed;
    }

    pub fn navigation(&self) -> NavigationState {
        match &self.state {
            Selection::Open { product, group } if !product.is_tour() && group.len() > 1 => {
                NavigationState {
                    can_go_prev: true,
                    can_go_next: true,
                }
            }
            _ => NavigationState::default(),
        }
    }
}
