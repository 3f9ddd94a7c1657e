//! Structured logging setup.
//!
//! The codec itself only emits `tracing` events; applications that want them
//! on stdout call [`init_logging`] once at startup. `RUST_LOG` overrides the
//! configured level when set.

use crate::config::LoggingConfig;
use crate::error::constants::ERR_LOGGING_INIT;
use crate::error::{ProtocolError, Result};
use once_cell::sync::OnceCell;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a global fmt subscriber. Later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INITIALIZED.get_or_try_init(|| -> Result<()> {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(config.log_level).into())
            .from_env_lossy();

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target);

        let installed = if config.json_format {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        installed.map_err(|e| ProtocolError::ConfigError(format!("{ERR_LOGGING_INIT}: {e}")))?;

        info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
        Ok(())
    })?;
    Ok(())
}
