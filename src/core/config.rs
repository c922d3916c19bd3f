use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::engine::DemoKind;
use crate::core::validator::{ConfigValidator, StandardValidator};
use crate::patterns::abstract_factory::Environment;

pub const CONFIG_FILE_NAME: &str = "pattern-gallery.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalSettings {
    pub verbose: bool,
    pub colored: bool,
    /// Selects the data-access family used by the abstract factory demo.
    pub environment: Environment,
    /// Currency passed to the payment demos.
    pub default_currency: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            colored: true,
            environment: Environment::Production,
            default_currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GalleryConfig {
    pub version: String,
    /// Demos run by `run --all`, in order.
    pub demos: Vec<String>,
    pub global_settings: GlobalSettings,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            demos: DemoKind::ALL.iter().map(|kind| kind.to_string()).collect(),
            global_settings: GlobalSettings::default(),
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    root: PathBuf,
}

impl ConfigManager {
    /// Uses `pattern-gallery.toml` in the current working directory.
    pub fn new() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to read current directory")?;
        Self::new_at(root)
    }

    pub fn new_at(root: PathBuf) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Config directory does not exist: {}", root.display());
        }
        let config_path = root.join(CONFIG_FILE_NAME);
        Ok(Self { config_path, root })
    }

    /// Writes the default config unless one is already present.
    pub fn initialize(&self) -> Result<()> {
        if self.config_path.exists() {
            debug!(path = %self.config_path.display(), "config already present");
            return Ok(());
        }

        let default_config = GalleryConfig::default();
        self.save_config(&default_config)?;
        Ok(())
    }

    pub fn validate_config(&self) -> Result<()> {
        let config = self.load_config()?;
        let validator = StandardValidator::new();
        let issues = validator.validate_config(&config)?;

        if issues.is_empty() {
            println!("✓ Configuration is valid.");
            Ok(())
        } else {
            println!("⚠️  Found issues in configuration:");
            for issue in issues {
                println!("  - {issue}");
            }
            anyhow::bail!("Configuration validation failed.");
        }
    }

    /// Enables a demo by name, keeping the list free of duplicates.
    pub fn enable_demo(&mut self, name: &str) -> Result<()> {
        let kind: DemoKind = name.parse()?;
        let mut config = self.load_config()?;
        let name = kind.to_string();
        if !config.demos.contains(&name) {
            config.demos.push(name);
        }
        self.save_config(&config)
    }

    pub fn disable_demo(&mut self, name: &str) -> Result<()> {
        let mut config = self.load_config()?;
        config.demos.retain(|demo| demo != name);
        self.save_config(&config)
    }

    pub fn export_config(&self, file_path: &str, format: &str) -> Result<()> {
        let config = self.load_config()?;

        let content = match format {
            "json" => {
                serde_json::to_string_pretty(&config).context("Failed to serialize to JSON")?
            }
            "yaml" => serde_yaml::to_string(&config).context("Failed to serialize to YAML")?,
            "toml" => toml::to_string_pretty(&config).context("Failed to serialize to TOML")?,
            other => anyhow::bail!("Unsupported export format: {other}"),
        };

        fs::write(file_path, content).context("Failed to write export file")?;

        Ok(())
    }

    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

pub trait ConfigProvider {
    fn load_config(&self) -> Result<GalleryConfig>;
    fn save_config(&self, config: &GalleryConfig) -> Result<()>;
    fn get_config_path(&self) -> Result<PathBuf>;
}

impl ConfigProvider for ConfigManager {
    fn load_config(&self) -> Result<GalleryConfig> {
        if !self.config_path.exists() {
            return Ok(GalleryConfig::default());
        }

        let content =
            fs::read_to_string(&self.config_path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    fn save_config(&self, config: &GalleryConfig) -> Result<()> {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, content).context("Failed to write config file")?;
        debug!(path = %self.config_path.display(), "saved config");

        Ok(())
    }

    fn get_config_path(&self) -> Result<PathBuf> {
        Ok(self.config_path.clone())
    }
}
