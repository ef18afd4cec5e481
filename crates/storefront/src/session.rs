//! One visitor session over a loaded catalog.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use trailhead_catalog::{
    CatalogPartition, ContactChannels, PriceQuote, PricingRules, Product, SkippedEntry, load_json,
    partition,
};
use trailhead_core::{Clock, DomainError, DomainResult, ProductId};

use crate::config::StorefrontConfig;
use crate::error::StorefrontResult;
use crate::mode::{DisplayMode, HeroContent, SharedMode};
use crate::schedule::{ScheduledTask, TaskHandle};
use crate::selection::{Direction, NavigationState, SelectionController};
use crate::view::{DetailView, ProductCard};

/// Session facade: catalog sections, pricing, the detail view and background tasks.
///
/// Background tasks belong to the session; dropping it (or calling
/// [`Storefront::shutdown`]) stops all of them.
pub struct Storefront {
    catalog: CatalogPartition,
    skipped: Vec<SkippedEntry>,
    clock: Arc<dyn Clock>,
    pricing: PricingRules,
    contact: ContactChannels,
    selection: SelectionController,
    mode: SharedMode,
    tasks: Vec<TaskHandle>,
}

impl core::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storefront")
            .field("tours", &self.catalog.tours().len())
            .field("rentals", &self.catalog.rentals().len())
            .field("skipped", &self.skipped.len())
            .field("selection", self.selection.state())
            .field("mode", &self.mode.get())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl Storefront {
    /// Build a session over already-validated products. No tasks are started.
    pub fn new(products: Vec<Product>, config: &StorefrontConfig, clock: Arc<dyn Clock>) -> Self {
        let catalog = partition(products);
        info!(
            tours = catalog.tours().len(),
            rentals = catalog.rentals().len(),
            "storefront session created"
        );
        Self {
            selection: SelectionController::from_partition(&catalog),
            catalog,
            skipped: Vec::new(),
            clock,
            pricing: PricingRules::new(config.happy_hour),
            contact: config.contact.clone(),
            mode: SharedMode::new(config.initial_mode),
            tasks: Vec::new(),
        }
    }

    /// Load a JSON feed and start the background tasks the config asks for.
    pub fn open_feed(
        feed: &str,
        config: &StorefrontConfig,
        clock: Arc<dyn Clock>,
    ) -> StorefrontResult<Self> {
        let loaded = load_json(feed)?;
        let mut storefront = Self::new(loaded.products, config, clock);
        storefront.skipped = loaded.skipped;
        storefront.start_tasks(config)?;
        Ok(storefront)
    }

    /// Start the mode rotation and happy-hour watcher configured in `config`.
    pub fn start_tasks(&mut self, config: &StorefrontConfig) -> StorefrontResult<()> {
        if let Some(every) = config.rotate_every {
            self.start_mode_rotation(every)?;
        }
        if let Some(every) = config.watch_every {
            self.watch_happy_hour(every, |_| {})?;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &CatalogPartition {
        &self.catalog
    }

    /// Feed entries that were rejected while loading.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn contact(&self) -> &ContactChannels {
        &self.contact
    }

    pub fn pricing(&self) -> PricingRules {
        self.pricing
    }

    /// Current quote for `product`; reads the clock on every call.
    pub fn quote(&self, product: &Product) -> PriceQuote {
        self.pricing.quote_now(product, self.clock.as_ref())
    }

    pub fn is_happy_hour(&self) -> bool {
        self.pricing.is_happy_hour(self.clock.as_ref())
    }

    /// Site-wide banner text while the discount window is open.
    pub fn happy_hour_banner(&self) -> Option<String> {
        self.is_happy_hour().then(|| {
            format!(
                "Happy Hour: Special prices until {:02}:00!",
                self.pricing.happy_hour().end_hour()
            )
        })
    }

    pub fn tour_cards(&self) -> Vec<ProductCard> {
        self.cards(self.catalog.tours().iter())
    }

    pub fn rental_cards(&self) -> Vec<ProductCard> {
        self.cards(self.catalog.rentals().iter())
    }

    fn cards<'a>(&self, products: impl Iterator<Item = &'a Arc<Product>>) -> Vec<ProductCard> {
        products
            .map(|p| ProductCard::build(p, self.quote(p), &self.contact))
            .collect()
    }

    /// Open a catalog product by id. Unknown ids leave the detail view as it was.
    pub fn select_by_id(&mut self, id: &ProductId) -> DomainResult<()> {
        let product = self.catalog.find(id).cloned().ok_or_else(DomainError::not_found)?;
        self.selection.select(product);
        Ok(())
    }

    /// Open any product, including one that is not part of this catalog.
    pub fn select(&mut self, product: Arc<Product>) {
        self.selection.select(product);
    }

    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.selection.navigate(direction)
    }

    pub fn navigate_raw(&mut self, direction: &str) -> bool {
        self.selection.navigate_raw(direction)
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    pub fn navigation(&self) -> NavigationState {
        self.selection.navigation()
    }

    pub fn open_product(&self) -> Option<&Arc<Product>> {
        self.selection.open_product()
    }

    /// Detail view for the open product, priced at the current time.
    pub fn detail(&self) -> Option<DetailView> {
        let product = self.selection.open_product()?.clone();
        let now = self.clock.now();
        let window = self.pricing.happy_hour();
        Some(DetailView::build(
            product.clone(),
            self.pricing.quote(&product, now),
            self.selection.navigation(),
            window,
            window.is_active(now),
            &self.contact,
        ))
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode.get()
    }

    pub fn set_mode(&self, mode: DisplayMode) {
        debug!(?mode, "display mode set");
        self.mode.set(mode);
    }

    pub fn hero(&self) -> HeroContent {
        self.mode.get().hero()
    }

    /// Cards for the section the current mode promotes.
    pub fn featured_cards(&self) -> Vec<ProductCard> {
        self.cards(self.catalog.group(self.mode.get().category()).iter())
    }

    /// Toggle between tours and rentals every `every`.
    pub fn start_mode_rotation(&mut self, every: Duration) -> StorefrontResult<()> {
        let mode = self.mode.clone();
        let handle = ScheduledTask::spawn("trailhead-mode-rotation", every, move || {
            let next = mode.toggle();
            debug!(mode = ?next, "display mode rotated");
        })?;
        self.tasks.push(handle);
        Ok(())
    }

    /// Re-check the discount window every `every`, calling `on_change` when it
    /// opens (`true`) or closes (`false`).
    pub fn watch_happy_hour<F>(&mut self, every: Duration, mut on_change: F) -> StorefrontResult<()>
    where
        F: FnMut(bool) + Send + 'static,
    {
        let clock = self.clock.clone();
        let window = self.pricing.happy_hour();
        let mut active = window.is_active(clock.now());

        let handle = ScheduledTask::spawn("trailhead-happy-hour", every, move || {
            let now_active = window.is_active(clock.now());
            if now_active != active {
                active = now_active;
                if active {
                    info!(label = %window.label(), "happy hour started");
                } else {
                    info!(label = %window.label(), "happy hour ended");
                }
                on_change(active);
            }
        })?;
        self.tasks.push(handle);
        Ok(())
    }

    pub fn running_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_running()).count()
    }

    /// Stop every background task. Idempotent.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.cancel();
        }
    }
}
