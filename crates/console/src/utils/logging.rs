//! Logging initialisation
//!
//! Human-readable (or JSON) output on stderr plus an audit file written
//! through a non-blocking appender. The returned guard must live until exit
//! or buffered file records are lost.

use std::path::Path;

use adops_domain::{AdOpsError, LoggingConfig, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Filter from `RUST_LOG`, else `override_level`, else the configured level.
pub fn env_filter(config: &LoggingConfig, override_level: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let level = override_level.unwrap_or(&config.level);
    EnvFilter::try_new(level)
        .map_err(|e| AdOpsError::Config(format!("Invalid log filter {level:?}: {e}")))
}

/// Install the global subscriber.
pub fn init_logging(
    config: &LoggingConfig,
    override_level: Option<&str>,
) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config, override_level)?;

    let stderr_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer().with_target(false).with_writer(std::io::stderr).boxed()
    };

    let (file_layer, guard) = match config.file.as_deref() {
        Some(file) => {
            let path = Path::new(file);
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| AdOpsError::Config(format!("Invalid log file path: {file}")))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AdOpsError::Internal(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}
