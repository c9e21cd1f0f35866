use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::planner::ViewType;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub planner: PlannerConfig,
    pub ui: UiConfig,
    #[serde(default)]
    pub roster: RosterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannerConfig {
    pub first_day_of_week: String,
    pub default_view: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
    pub time_format: String,
    pub date_format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RosterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rep-planner")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Unrecognised names fall back to Sunday.
    pub fn first_weekday(&self) -> Weekday {
        self.planner.first_day_of_week.parse().unwrap_or(Weekday::Sun)
    }

    pub fn default_view(&self) -> ViewType {
        match self.planner.default_view.to_lowercase().as_str() {
            "month" | "monthly" => ViewType::Month,
            "day" | "daily" => ViewType::Day,
            _ => ViewType::Week,
        }
    }

    pub fn uses_12h_clock(&self) -> bool {
        self.ui.time_format.eq_ignore_ascii_case("12h")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: PlannerConfig {
                first_day_of_week: "Sunday".to_string(),
                default_view: "Week".to_string(),
            },
            ui: UiConfig {
                theme: "default".to_string(),
                time_format: "24h".to_string(),
                date_format: "%Y-%m-%d".to_string(),
            },
            roster: RosterConfig::default(),
        }
    }
}
