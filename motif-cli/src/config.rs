//! Configuration handling for the motif-mark CLI
//!
//! Supports loading configuration from motif-mark.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use motif_core::LayoutConfig;
use motif_render::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "motif-mark.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Annotate records on the rayon pool
    pub parallel: bool,

    /// Worker threads for parallel annotation (rayon default when unset)
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from the given file, `motif-mark.toml`, or defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        Self::default().to_toml()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::Color;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.general.parallel);
        assert_eq!(config.general.threads, None);
        assert_eq!(config.layout.vertical_spacing, 200.0);
        assert_eq!(config.layout.palette.len(), 5);
        assert_eq!(config.render.width, 1100);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.general.parallel = true;
        config.general.threads = Some(4);
        config.layout.palette = vec![Color::rgb(0, 0, 0), Color::rgb(0, 191, 255)];
        config.render.provenance_comment = Some("lab run".to_string());
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded_config = Config::load_from_file(temp_file.path())?;

        assert!(loaded_config.general.parallel);
        assert_eq!(loaded_config.general.threads, Some(4));
        assert_eq!(loaded_config.layout, config.layout);
        assert_eq!(loaded_config.render.width, config.render.width);
        assert_eq!(
            loaded_config.render.provenance_comment.as_deref(),
            Some("lab run")
        );

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(
            temp_file.path(),
            "[layout]\nvertical_spacing = 150.0\npalette = [\"#000000\"]\n",
        )?;

        let config = Config::load_from_file(temp_file.path())?;
        assert_eq!(config.layout.vertical_spacing, 150.0);
        assert_eq!(config.layout.left_margin, 100.0);
        assert_eq!(config.layout.palette, vec![Color::BLACK]);
        assert_eq!(config.render.height, 1100);
        Ok(())
    }

    #[test]
    fn test_bad_color_is_rejected() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        std::fs::write(temp_file.path(), "[render]\nbackground_color = \"white\"\n")?;
        assert!(Config::load_from_file(temp_file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/motif-mark.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[general]"));
        assert!(example.contains("[layout]"));
        assert!(example.contains("[render]"));
        assert!(example.contains("vertical_spacing"));
        Ok(())
    }
}
