//! Tracing setup shared by both binaries.
//!
//! `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `info` or
//! `catalog_rest=debug,tower_http=debug`) is used.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn setup_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
