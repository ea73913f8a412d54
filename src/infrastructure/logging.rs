use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. `RUST_LOG` overrides `fallback`, which is
/// the configured `LOG_LEVEL`.
pub fn init_logging(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let format = fmt::layer().with_target(true);

    tracing_subscriber::registry().with(filter).with(format).init();
}
