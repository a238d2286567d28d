pub mod config;
pub mod layers;

pub use config::LoggingConfig;
pub use layers::console::ConsoleOutput;

use crate::Result;
use anyhow::{anyhow, Context};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Handle describing the sinks installed by [`init`].
pub struct LoggingGuard {
    console_output: ConsoleOutput,
    level: String,
}

impl LoggingGuard {
    /// Returns the console output configuration used during initialization.
    pub fn console_output(&self) -> ConsoleOutput {
        self.console_output
    }

    /// Returns the default level applied when `RUST_LOG` is unset.
    pub fn level(&self) -> &str {
        &self.level
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured default level. Errors when invoked more than once
/// per process.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_level))
        .context("failed to configure tracing level")?;

    let console_layer = layers::console::console_layer::<Registry>(config.console_output);
    tracing_subscriber::registry()
        .with(console_layer)
        .with(env_filter)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        console_output: config.console_output,
        level: config.default_level.clone(),
    })
}
