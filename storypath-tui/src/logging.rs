use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::StoryPathConfig;

/// Send tracing output to the log file. The terminal is owned by the UI, so
/// nothing is ever written to stdout.
pub fn init(cfg: &StoryPathConfig) -> Result<()> {
    let path = StoryPathConfig::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file at {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::info!(
        "storypath-tui v{} logging to {}",
        env!("CARGO_PKG_VERSION"),
        path.display()
    );
    Ok(())
}
