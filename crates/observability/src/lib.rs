//! Process-wide tracing setup shared by the storefront binaries.

/// Initialize JSON tracing output for the process.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Tracing configuration (filters, formatting).
pub mod tracing;
