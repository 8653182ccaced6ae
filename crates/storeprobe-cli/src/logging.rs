//! Log subscriber setup

use crate::config::CliConfig;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub fn default_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_level()))
}

/// Install the global subscriber writing to stderr.
///
/// A second call is a no-op so handlers can be driven from tests.
pub fn init_logging(config: &CliConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(default_filter(config))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.color.should_color()).try_init()
    };
    if result.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
