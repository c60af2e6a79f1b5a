//! Configuration management for stackable-shipping
//!
//! Config stored at: ~/.config/stackable-shipping/config.json
//! (`STACKABLE_SHIPPING_CONFIG_DIR` overrides the directory)

use serde::{Deserialize, Serialize};
use stackship_types::{ConfigError, OutputFormat, Result, TaxStatus, DEFAULT_VOLUMETRIC_DIVISOR};

use crate::constants::DEFAULT_METHOD_TITLE;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "STACKABLE_SHIPPING_CONFIG_DIR";

const APP_DIR: &str = "stackable-shipping";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Carrier store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Divisor for ad-hoc weight calculations not tied to a carrier
    #[serde(default = "default_divisor")]
    pub default_divisor: u32,

    /// Shipping method title shown at checkout
    #[serde(default = "default_method_title")]
    pub method_title: String,

    /// Tax status applied to every shipping rate
    #[serde(default)]
    pub tax_status: TaxStatus,
}

fn default_divisor() -> u32 {
    DEFAULT_VOLUMETRIC_DIVISOR
}

fn default_method_title() -> String {
    DEFAULT_METHOD_TITLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            output_format: OutputFormat::default(),
            default_divisor: default_divisor(),
            method_title: default_method_title(),
            tax_status: TaxStatus::default(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        let config_dir = dirs::config_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the carrier store directory
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let store_dir = dirs::data_dir().ok_or(ConfigError::NotFound)?.join(APP_DIR);
        Ok(store_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(format!("{}: {}", parent.display(), e)))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Stackable Shipping Configuration")?;
        writeln!(f, "================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:       {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:   {}", self.output_format)?;
        writeln!(f, "Default divisor: {}", self.default_divisor)?;
        writeln!(f, "Method title:    {}", self.method_title)?;
        writeln!(f, "Tax status:      {}", self.tax_status)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:     {}", path.display())?;
        }

        Ok(())
    }
}
