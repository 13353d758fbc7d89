#![forbid(unsafe_code)]

//! Subscriber setup for native hosts and tests.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "yatra_web=info,yatra_widgets=info,yatra_runtime=warn";

/// Install a fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
pub fn init() -> bool {
    init_with(DEFAULT_FILTER)
}

/// Like [`init`] with an explicit fallback filter.
pub fn init_with(fallback: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
