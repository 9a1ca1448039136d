//! Tracing subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// The filter directive used when `RUST_LOG` is unset.
#[must_use]
pub fn filter_directive(config: &Config) -> String {
    config
        .trace_level
        .clone()
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs a formatting subscriber writing to stderr.
///
/// Safe to call more than once: only the first call takes effect. An invalid
/// `RUST_LOG` falls back to the configured level.
///
/// # Example
///
/// ```rust
/// use sift::observability::init_tracing;
/// use sift::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    if subscriber.try_init().is_err() {
        tracing::trace!("tracing subscriber already installed");
    }
}
