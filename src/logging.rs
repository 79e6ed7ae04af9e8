//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

/// Install a fmt subscriber on stderr.
///
/// The filter comes from `FOLIOBOARD_LOG`, then `RUST_LOG`, then `info`.
/// Calling this more than once is harmless; later calls leave the first
/// subscriber in place.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
