//! Logging initialization.
//!
//! `tracing`-based, configured through the `RUST_LOG` environment variable
//! (default: `info`).

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global subscriber for the binary.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

/// Initializes a test-friendly subscriber; repeated calls are no-ops.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
