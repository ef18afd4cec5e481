//! Storefront session layer.
//!
//! Ties the catalog to a single visitor: which product is open, how the
//! prev/next controls behave, what the hero advertises, and the background
//! tasks that keep prices and the display mode current.

pub mod config;
pub mod error;
pub mod mode;
pub mod schedule;
pub mod selection;
pub mod session;
pub mod view;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{StorefrontError, StorefrontResult};
pub use mode::{DisplayMode, HeroContent, SharedMode};
pub use schedule::{ScheduledTask, TaskHandle};
pub use selection::{Direction, NavigationState, Selection, SelectionController};
pub use session::Storefront;
pub use view::{DetailView, HappyHourOffer, ProductCard, RENTAL_CARD_FEATURES};
