//! Logging setup

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this
/// more than once is harmless; returns false when a subscriber was already
/// installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
