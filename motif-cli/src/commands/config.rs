//! Config command implementation - print or save the effective or example configuration

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;

pub fn execute(config: &Config, example: bool, save: Option<PathBuf>) -> Result<()> {
    let selected = select(config, example);

    if let Some(path) = save {
        selected.save_to_file(&path)?;
        log::info!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let content = if example {
        Config::example_toml()?
    } else {
        selected.to_toml()?
    };
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn select(config: &Config, example: bool) -> Config {
    if example {
        Config::default()
    } else {
        config.clone()
    }
}
