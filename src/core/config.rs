//! TOML settings file.
//!
//! Every section and key is optional; anything missing takes its
//! default. A file that fails to parse is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::system_monitor::SortBy;
use crate::error::{Result, WellzError};

pub const MIN_REFRESH_RATE: f64 = 0.5;
pub const MAX_REFRESH_RATE: f64 = 10.0;
/// Amount `+`/`-` change the refresh rate by, in seconds
pub const REFRESH_STEP: f64 = 0.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
    pub processes: ProcessConfig,
    pub keybindings: KeybindingConfig,
    pub advanced: AdvancedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Seconds between ticks
    pub refresh_rate: f64,
    pub history_size: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 1.0,
            history_size: 120,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphStyle {
    #[default]
    Braille,
    Block,
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_cpu: bool,
    pub show_memory: bool,
    pub show_network: bool,
    pub show_disk: bool,
    pub show_gpu: bool,
    pub show_processes: bool,
    pub show_battery: bool,
    pub show_security: bool,
    pub graph_style: GraphStyle,
    pub show_graphs: bool,
    pub graph_height: u16,
    pub show_per_core: bool,
    pub max_cores: usize,
    pub max_disks: usize,
    pub max_interfaces: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_cpu: true,
            show_memory: true,
            show_network: true,
            show_disk: true,
            show_gpu: true,
            show_processes: true,
            show_battery: true,
            show_security: true,
            graph_style: GraphStyle::Braille,
            show_graphs: true,
            graph_height: 5,
            show_per_core: true,
            max_cores: 8,
            max_disks: 4,
            max_interfaces: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub sort_by: SortBy,
    pub sort_descending: bool,
    pub tree_view: bool,
    pub max_processes: usize,
    /// Refresh the process list every N ticks
    pub update_interval: u32,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Cpu,
            sort_descending: true,
            tree_view: false,
            max_processes: 20,
            update_interval: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    /// j/k/g/G navigation
    pub vim_mode: bool,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self { vim_mode: true }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    pub fn convert(self, celsius: f32) -> f32 {
        match self {
            TempUnit::Celsius => celsius,
            TempUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TempUnit::Celsius => "°C",
            TempUnit::Fahrenheit => "°F",
        }
    }

    pub fn format(self, celsius: f32) -> String {
        format!("{:.0}{}", self.convert(celsius), self.suffix())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    pub temp_unit: TempUnit,
}

/// Clamp a refresh rate into the supported range.
pub fn clamp_refresh_rate(seconds: f64) -> f64 {
    if seconds.is_nan() {
        return GeneralConfig::default().refresh_rate;
    }
    seconds.clamp(MIN_REFRESH_RATE, MAX_REFRESH_RATE)
}

impl Config {
    /// `<config_dir>/wellz/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WellzError::config("Could not determine config directory"))?;
        Ok(config_dir.join("wellz").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file yields all defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse TOML text and normalize out-of-range values.
    pub fn parse(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        self.general.refresh_rate = clamp_refresh_rate(self.general.refresh_rate);
        self.general.history_size = self.general.history_size.max(1);
        self.display.graph_height = self.display.graph_height.max(1);
        self.processes.update_interval = self.processes.update_interval.max(1);
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Write the default config to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn init_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        Config::default().save_to(path)?;
        Ok(true)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(self.general.refresh_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_rate_clamped() {
        let config = Config::parse("[general]\nrefresh_rate = 0.01\n").unwrap();
        assert_eq!(config.general.refresh_rate, MIN_REFRESH_RATE);

        let config = Config::parse("[general]\nrefresh_rate = 60.0\n").unwrap();
        assert_eq!(config.general.refresh_rate, MAX_REFRESH_RATE);
    }

    #[test]
    fn test_unknown_enum_value_is_an_error() {
        assert!(Config::parse("[display]\ngraph_style = \"sixel\"\n").is_err());
    }

    #[test]
    fn test_fahrenheit() {
        assert_eq!(TempUnit::Fahrenheit.convert(100.0), 212.0);
        assert_eq!(TempUnit::Celsius.format(41.6), "42°C");
    }
}
