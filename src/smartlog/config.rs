use crate::error::{Result, SmartlogError};
use crate::logbook::LogbookOptions;
use crate::model::DEFAULT_TIMESTAMP_FORMAT;
use crate::view::SortOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for smartlog, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SmartlogConfig {
    /// strftime pattern used to stamp new logs
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Show newest logs first
    #[serde(default)]
    pub descending: bool,

    /// Write two sample logs the first time the data directory is used
    #[serde(default = "default_seed")]
    pub seed_on_first_run: bool,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for SmartlogConfig {
    fn default() -> Self {
        Self {
            timestamp_format: default_timestamp_format(),
            descending: false,
            seed_on_first_run: default_seed(),
        }
    }
}

impl SmartlogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SmartlogError::Io)?;
        let config: SmartlogConfig =
            serde_json::from_str(&content).map_err(SmartlogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SmartlogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SmartlogError::Serialization)?;
        fs::write(config_path, content).map_err(SmartlogError::Io)?;
        Ok(())
    }

    pub fn sort_order(&self) -> SortOrder {
        if self.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    pub fn logbook_options(&self) -> LogbookOptions {
        LogbookOptions {
            timestamp_format: self.timestamp_format.clone(),
            seed_on_first_run: self.seed_on_first_run,
        }
    }

    /// Value of a single key, as shown by `config <key>`.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "timestamp-format" => Ok(self.timestamp_format.clone()),
            "descending" => Ok(self.descending.to_string()),
            "seed" => Ok(self.seed_on_first_run.to_string()),
            other => Err(SmartlogError::Api(format!("Unknown config key: {}", other))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "timestamp-format" => {
                if value.trim().is_empty() {
                    return Err(SmartlogError::Api(
                        "timestamp-format cannot be empty".to_string(),
                    ));
                }
                self.timestamp_format = value.to_string();
            }
            "descending" => self.descending = parse_bool(key, value)?,
            "seed" => self.seed_on_first_run = parse_bool(key, value)?,
            other => {
                return Err(SmartlogError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["timestamp-format", "descending", "seed"]
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(SmartlogError::Api(format!(
            "Invalid value for {}: {} (expected true/false)",
            key, value
        ))),
    }
}
