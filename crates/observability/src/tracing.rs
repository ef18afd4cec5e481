//! Tracing subscriber configuration.
//!
//! Output is one JSON object per event. `RUST_LOG` overrides the default
//! filter, e.g. `RUST_LOG=trailhead_storefront=debug` to see mode rotation
//! and task lifecycle events.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global JSON subscriber.
///
/// Returns `false` when a subscriber was already installed.
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .with_thread_names(true)
        .try_init()
        .is_ok()
}
