//! Slicer configuration parsed from environment variables.
//!
//! Every setting can be overridden via environment variables prefixed with
//! `GHERKIN_SLICER_`, and command-line flags take precedence over both.

use std::env;
use std::str::FromStr;

use camino::Utf8PathBuf;

use crate::error::ConfigError;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "GHERKIN_SLICER_LOG_LEVEL";
/// Environment variable holding the output directory.
pub const OUT_DIR_VAR: &str = "GHERKIN_SLICER_OUT_DIR";

/// Default output directory, relative to the working directory.
const DEFAULT_OUT_DIR: &str = "split";

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Info` when not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Per-unit progress.
    Debug,
    /// Per-input progress.
    #[default]
    Info,
    /// Failed inputs only.
    Warn,
    /// Fatal errors only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for a slicing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicerConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: LogLevel,
    /// Base directory receiving the sliced feature files.
    pub out_dir: Utf8PathBuf,
}

impl Default for SlicerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            out_dir: Utf8PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl SlicerConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `GHERKIN_SLICER_LOG_LEVEL` and `GHERKIN_SLICER_OUT_DIR`, falling
    /// back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = match lookup(LOG_LEVEL_VAR) {
            Some(val) => val.parse()?,
            None => LogLevel::default(),
        };

        let out_dir = match lookup(OUT_DIR_VAR) {
            Some(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidConfig(format!(
                    "{OUT_DIR_VAR} must not be empty"
                )));
            }
            Some(val) => Utf8PathBuf::from(val),
            None => Utf8PathBuf::from(DEFAULT_OUT_DIR),
        };

        Ok(Self { log_level, out_dir })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Intended for CLI flags that take precedence over the environment.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        out_dir: Option<Utf8PathBuf>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }

        if let Some(dir) = out_dir {
            self.out_dir = dir;
        }

        self
    }
}
