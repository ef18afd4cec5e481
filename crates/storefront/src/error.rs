//! Session-level errors.

use thiserror::Error;

use trailhead_catalog::FeedError;
use trailhead_core::DomainError;

use crate::config::ConfigError;

/// Result type for session setup and lifecycle operations.
pub type StorefrontResult<T> = Result<T, StorefrontError>;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("scheduled task {0:?} needs an interval greater than zero")]
    ZeroInterval(String),

    #[error("failed to start scheduled task {task:?}: {source}")]
    Spawn {
        task: String,
        #[source]
        source: std::io::Error,
    },
}
