//! Tracing bootstrap for binaries, benchmarks and tests embedding rstore.

use tracing_subscriber::{
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,rstore_core=debug,rstore_config=debug,rstore_redis=debug";

/// Installs a global fmt subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already installed, which makes repeated
/// calls from tests harmless when the result is ignored.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
}
