//! Tracing subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "catalog-browser.log";

/// Installs the global subscriber writing plain-text events to the rotating
/// log file in the data directory.
///
/// The filter is taken from `RUST_LOG` when set, else from
/// `config.trace_level`, else `info`. The terminal is never written to since
/// it belongs to the browser UI.
///
/// Returns the log file path, or `None` if the data directory could not be
/// created or a subscriber was already installed. Logging is optional and
/// either case is silent.
///
/// ```no_run
/// use catalog_browser::observability::init_tracing;
/// use catalog_browser::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_path = data_dir.join(LOG_FILE_NAME);
    let writer = Arc::new(FileWriter::new(log_path.clone()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(false))
        .try_init()
        .ok()?;

    Some(log_path)
}
