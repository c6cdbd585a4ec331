//! Tracing setup: stderr plus an optional daily rolling log file.

use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "carter.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. When `log_dir` is set,
/// logs are also written to `log_dir/carter.log.YYYY-MM-DD`; keep the
/// returned guard alive so buffered lines get flushed.
pub fn init(default_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("Invalid log level '{}': {}", default_level, e))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", dir, e))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| anyhow!("Failed to install logger: {}", e))?;
            Ok(None)
        }
    }
}
