use std::{
    fs::File,
    io::{self, BufReader, Write as _},
    path::Path,
    sync::Arc,
};

use anyhow::Context;
use perfection_engine::Catalog;
use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to `path`, leaving the terminal to the TUI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub(crate) fn init_logging(path: &Path) -> anyhow::Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;
    Ok(())
}

pub(crate) fn read_catalog_file(path: &Path) -> anyhow::Result<Catalog> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalog file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let catalog = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
    Ok(catalog)
}

pub(crate) fn write_json<T>(value: &T) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline after JSON to stdout")?;
    Ok(())
}
