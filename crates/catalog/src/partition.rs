//! Tour / rental partition of the catalog.

use std::sync::Arc;

use trailhead_core::{Entity, ProductId};

use crate::product::{Category, Product};

/// An ordered, shared, read-only sequence of products.
///
/// Cloning is cheap; the selection controller keeps one as the active group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductGroup(Arc<[Arc<Product>]>);

impl ProductGroup {
    pub fn new(products: Vec<Arc<Product>>) -> Self {
        Self(products.into())
    }

    /// A group holding just one product (never navigable).
    pub fn single(product: Arc<Product>) -> Self {
        Self(Arc::from(vec![product]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Product>> {
        self.0.get(index)
    }

    /// Index of the product with this id, if it belongs to the group.
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.0.iter().position(|p| p.id() == id)
    }

    pub fn find(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.0.iter().find(|p| p.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> + '_ {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Arc<Product>] {
        &self.0
    }
}

/// The catalog split into its two display sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogPartition {
    tours: ProductGroup,
    rentals: ProductGroup,
}

impl CatalogPartition {
    pub fn tours(&self) -> &ProductGroup {
        &self.tours
    }

    pub fn rentals(&self) -> &ProductGroup {
        &self.rentals
    }

    pub fn group(&self, category: Category) -> &ProductGroup {
        match category {
            Category::Tour => &self.tours,
            Category::Rental => &self.rentals,
        }
    }

    /// Look a product up in either section.
    pub fn find(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.tours.find(id).or_else(|| self.rentals.find(id))
    }

    pub fn len(&self) -> usize {
        self.tours.len() + self.rentals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty() && self.rentals.is_empty()
    }
}

/// Split products into tours and rentals, preserving relative order in each.
///
/// Pure and deterministic: the same input always yields the same partition.
pub fn partition<I>(products: I) -> CatalogPartition
where
    I: IntoIterator<Item = Product>,
{
    partition_shared(products.into_iter().map(Arc::new))
}

/// Same as [`partition`] for products that are already shared.
pub fn partition_shared<I>(products: I) -> CatalogPartition
where
    I: IntoIterator<Item = Arc<Product>>,
{
    let (tours, rentals): (Vec<_>, Vec<_>) = products.into_iter().partition(|p| p.is_tour());
    CatalogPartition {
        tours: ProductGroup::new(tours),
        rentals: ProductGroup::new(rentals),
    }
}
