//! Structured logging setup.
//!
//! Logs go to stderr so that stdout only carries the written paths (or the
//! rendered bodies in a dry run).

use tracing_subscriber::EnvFilter;

use crate::config::SlicerConfig;

fn filter_from_config(config: &SlicerConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level`
/// 2. `GHERKIN_SLICER_LOG_LEVEL`
/// 3. Default configuration value
///
/// If a global subscriber is already set the call is ignored; the first
/// subscriber wins.
pub fn init_logging(config: &SlicerConfig) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter_from_config(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
