//! Terminal entry point.
//!
//! Loads the configuration, installs logging, opens the preference file and
//! runs the event loop on a single-threaded tokio runtime:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  Runtime (current thread)    │
//! │  ┌────────────────────────┐  │
//! │  │ AppState + handler     │  │  ← all state changes
//! │  └────────────────────────┘  │
//! │        │          ▲          │
//! │        ▼          │ mpsc     │
//! │  ┌────────────────────────┐  │
//! │  │ CatalogWorker tasks    │  │  ← HTTP fetch / generate
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! Commands are typed one per line; see `catalog_browser::ui::input`.

use anyhow::Context;
use catalog_browser::catalog::CatalogStore;
use catalog_browser::infrastructure::{default_config_file, HttpBackend, SystemClipboard};
use catalog_browser::runtime::{Runtime, DEFAULT_COLS, DEFAULT_ROWS};
use catalog_browser::storage::JsonStorage;
use catalog_browser::{initialize, observability, Config, Event};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "catalog-browser", version, about = "Browse a product and plugin catalog from the terminal")]
struct Args {
    /// Configuration file (default: platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog service base URL, overrides the configuration file
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter, overrides the configuration file
    #[arg(long)]
    trace_level: Option<String>,

    /// Page to open at startup, e.g. `products` or `#plugins`
    page: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_path = args.config.unwrap_or_else(default_config_file);
    let mut config = Config::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(level) = args.trace_level {
        config.trace_level = Some(level);
    }

    if let Some(log_path) = observability::init_tracing(&config) {
        eprintln!("logging to {}", log_path.display());
    }
    tracing::info!(base_url = %config.base_url, "starting catalog browser");

    let base_url = config.base_url().context("invalid base URL")?;
    let backend = Arc::new(HttpBackend::new(base_url, config.generate_path.clone())?);
    let preferences = JsonStorage::in_dir(&config.data_dir()).context("opening preference file")?;

    let state = initialize(&config, &preferences);
    let mut runtime = Runtime::new(
        state,
        Arc::new(CatalogStore::new(backend.clone())),
        backend,
        Box::new(preferences),
        Box::new(SystemClipboard),
        std::io::stdout(),
    )
    .with_size(terminal_dimension("LINES", DEFAULT_ROWS), terminal_dimension("COLUMNS", DEFAULT_COLS));

    if let Some(page) = args.page {
        runtime.dispatch(Event::Navigate(page))?;
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    runtime.run(stdin).await?;

    tracing::info!("catalog browser exited");
    Ok(())
}

/// Reads a terminal dimension exported by the shell, falling back to
/// `default`.
fn terminal_dimension(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .filter(|&value| value > 0)
        .unwrap_or(default)
}
