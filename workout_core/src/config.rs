//! Configuration file support for wtrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/wtrack/config.toml`.

use crate::catalog::default_catalog;
use crate::history::HISTORY_WEEKS;
use crate::report::ReportOptions;
use crate::{Error, PlanCatalog, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Which weekly plan to use
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PlanConfig {
    /// TOML plan file replacing the built-in plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Report parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_history_weeks")]
    pub history_weeks: usize,

    #[serde(default = "default_weight_unit")]
    pub weight_unit: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            history_weeks: default_history_weeks(),
            weight_unit: default_weight_unit(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir().join(".local/share"));
    base.join("wtrack")
}

fn default_history_weeks() -> usize {
    HISTORY_WEEKS
}

fn default_weight_unit() -> String {
    "kg".into()
}

fn home_dir() -> PathBuf {
    dirs::home_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"));
        base.join("wtrack").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.report.history_weeks == 0 {
            return Err(Error::Config("report.history_weeks must be at least 1".into()));
        }
        Ok(())
    }

    /// The configured plan, or the built-in one
    pub fn load_catalog(&self) -> Result<Cow<'static, PlanCatalog>> {
        match &self.plan.path {
            Some(path) => Ok(Cow::Owned(PlanCatalog::load_from(path)?)),
            None => Ok(Cow::Borrowed(default_catalog())),
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            history_weeks: self.report.history_weeks,
            weight_unit: self.report.weight_unit.clone(),
        }
    }
}
