//! Tracing initialization for pkgshim.
//!
//! Log output always goes to stderr: stdout carries the package listing and
//! must stay machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ShimConfig};
use crate::error::{Result, ShimError};

/// Initialize the global subscriber from an already loaded configuration.
///
/// `RUST_LOG` syntax applies to `config.log_filter`, e.g.
/// `pkgshim=debug,pkgshim_core=debug`.
pub fn init_with_config(config: &ShimConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.log_filter).map_err(|e| {
        ShimError::Internal(format!(
            "Invalid log filter '{}': {}",
            config.log_filter, e
        ))
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_writer(std::io::stderr);

    let result = match config.log_format {
        LogFormat::Json => registry.with(layer.with_ansi(false).json()).try_init(),
        LogFormat::Pretty => registry.with(layer.pretty()).try_init(),
        LogFormat::Compact => registry.with(layer.compact()).try_init(),
    };

    result.map_err(|e| ShimError::Internal(format!("Failed to initialize tracing: {}", e)))
}
