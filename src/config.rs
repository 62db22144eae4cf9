// Process settings (flags / environment) and the mapping settings file
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::{MappingConfig, StrategyRegistry};
use crate::strategy::StrategyCatalog;

#[derive(Parser, Debug, Clone)]
#[command(name = "reservation-mapper", version, about = "Reservation format mapping service")]
pub struct Config {
    /// Path of the JSON file holding the mapping configurations
    #[arg(long, env = "MAPPER_SETTINGS", default_value = "config/mappings.json")]
    pub settings: PathBuf,

    /// Address the HTTP server listens on
    #[arg(long, env = "MAPPER_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "MAPPER_LOG", default_value = "info")]
    pub log_filter: String,
}

// Contents of the settings file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppSettings {
    #[serde(
        rename = "MappingConfigurations",
        alias = "mappingConfigurations",
        default
    )]
    pub mapping_configurations: Vec<MappingConfig>,
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let settings: AppSettings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    // Rejects an empty list and entries with a blank field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mapping_configurations.is_empty() {
            return Err(ConfigError::Empty);
        }

        for (index, entry) in self.mapping_configurations.iter().enumerate() {
            let blank = [
                ("Strategy", &entry.strategy_name),
                ("SourceType", &entry.source_type),
                ("TargetType", &entry.target_type),
            ]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty());

            if let Some((name, _)) = blank {
                return Err(ConfigError::InvalidEntry {
                    index,
                    reason: format!("{} must not be empty", name),
                });
            }
        }

        Ok(())
    }

    pub fn build_registry(&self, catalog: &StrategyCatalog) -> Result<StrategyRegistry, ConfigError> {
        StrategyRegistry::build(&self.mapping_configurations, catalog)
    }
}
