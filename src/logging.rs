//! Tracing subscriber setup.
//!
//! The library only emits `tracing` events; embedding applications call
//! [`init_logging`] once at startup. `RUST_LOG` overrides the default
//! directive.

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber. Safe to call more than once.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Initialize test logging (call once per test module).
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chipdex=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
