use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Sends `log` output to `path` at debug level, with html5ever's own
/// tree-builder chatter filtered out.
pub fn init_file_logger(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(
        LevelFilter::Debug,
        ConfigBuilder::new()
            .set_max_level(LevelFilter::Debug)
            .add_filter_ignore_str("html5ever")
            .build(),
        file,
    )
    .context("A global logger is already installed")?;

    log::info!("Logging to {}", path.display());
    Ok(())
}
