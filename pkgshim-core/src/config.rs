//! Environment-driven configuration.
//!
//! pkgshim has no configuration file. Everything it can be told comes from
//! the environment and is read once, at startup, into [`ShimConfig`].

use std::env;

/// Interpreter override for driving pip.
pub const PYTHON_ENV: &str = "PKGSHIM_PYTHON";
/// Standard tracing filter variable.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
/// Log rendering: `json`, `pretty` or `compact`.
pub const LOG_FORMAT_ENV: &str = "RUST_LOG_FORMAT";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimConfig {
    /// Interpreter name or path; `None` means search `PATH` for a default.
    pub python: Option<String>,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            python: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ShimConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            python: get(PYTHON_ENV).map(|v| v.trim().to_string()),
            log_filter: get(LOG_FILTER_ENV).unwrap_or(defaults.log_filter),
            log_format: get(LOG_FORMAT_ENV)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
        }
    }
}
