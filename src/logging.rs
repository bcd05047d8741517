//! Tracing subscriber setup for the binary.

use std::io;

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, ServiceConfig};
use crate::error::{GenerationError, Result};

/// Filter from `RUST_LOG` when set, otherwise `recipe_relay=<level>` with
/// quieter defaults for the HTTP stack.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,recipe_relay={level},tower_http=info"
        ))
    })
}

/// Install the global subscriber. Logs go to stderr so `generate` output on
/// stdout stays machine-readable.
pub fn init(config: &ServiceConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(&config.log_level));

    let installed = match config.log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
            .try_init(),
    };

    installed.map_err(|e| GenerationError::Configuration(format!("cannot install logger: {e}")))
}
