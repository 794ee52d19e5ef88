// Structured logging setup

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "foliodesk=info";

/// Install the global fmt subscriber, filtered by `RUST_LOG` (default `foliodesk=info`).
///
/// Returns false if a global subscriber was already set, e.g. by the host application.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(event = "desk.logging.initialized");
    }
    installed
}
