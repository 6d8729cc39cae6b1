//! Shared tracing/logging setup for the treadstock binaries.
//!
//! The domain crates emit `tracing` events (degraded cart blobs, skipped
//! stale entries, catalog fallbacks); this crate turns them into output.

/// Initialize process-wide logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, format).
pub mod tracing;
