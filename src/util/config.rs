use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::format::options::{DEFAULT_DATE_FORMAT, strftime_formatter, validate_date_format};
use crate::format::{FormatOptions, MaxThreshold, Messages, Rounding, TimeUnit, Unit, UnitTable};
use crate::live::LiveOptions;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub live: LiveConfig,
    #[serde(default)]
    pub messages: Messages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default)]
    pub max: Option<MaxThreshold>,
    #[serde(default)]
    pub show_second: bool,
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub units: Option<Vec<UnitConfig>>,
}

/// A unit table row. A missing `max` means unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConfig {
    #[serde(default)]
    pub max: Option<f64>,
    pub value: f64,
    pub name: Unit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveConfig {
    #[serde(default = "default_update_interval")]
    pub update_interval_ms: u64,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_update_interval() -> u64 {
    30_000
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max: None,
            show_second: false,
            rounding: Rounding::default(),
            date_format: default_date_format(),
            units: None,
        }
    }
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        // Search candidate paths in order
        let mut candidates = Vec::new();

        // 1. ~/.config/timeago/config.toml (standard XDG on all platforms)
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/timeago/config.toml"));
        }

        // 2. Platform-specific path from `directories` crate
        if let Some(proj_dirs) = ProjectDirs::from("", "", "timeago") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                return Self::read(config_path);
            }
        }

        Ok(AppConfig::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn format_options(&self) -> Result<FormatOptions> {
        let units = match &self.format.units {
            Some(rows) => UnitTable::new(
                rows.iter()
                    .map(|row| TimeUnit::new(row.max.unwrap_or(f64::INFINITY), row.value, row.name))
                    .collect(),
            )
            .context("Invalid unit table in config")?,
            None => UnitTable::default(),
        };

        validate_date_format(&self.format.date_format).context("Invalid date_format in config")?;

        let mut options = FormatOptions {
            max: self.format.max,
            show_second: self.format.show_second,
            rounding: self.format.rounding,
            units,
            ..FormatOptions::default()
        }
        .with_messages(self.messages.clone());
        options.full_date = strftime_formatter(self.format.date_format.clone());
        Ok(options)
    }

    pub fn live_options(&self) -> LiveOptions {
        LiveOptions::default()
            .with_update_interval(Duration::from_millis(self.live.update_interval_ms))
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "timeago") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/timeago/logs")
    }
}
