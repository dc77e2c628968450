use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::gomoku::GomokuSettings;
use common::logger::LogLevel;

pub const CONFIG_FILE: &str = "gomoku_server.yaml";

pub fn get_config_manager(
    path: impl Into<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, ServerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub game: GomokuSettings,
    pub rooms: RoomConfig,
    pub log: LogConfig,
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.rooms.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct RoomConfig {
    pub cleanup_interval_secs: u64,
    pub inactivity_timeout_secs: u64,
}

impl RoomConfig {
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_secs: 300,
            inactivity_timeout_secs: 3600,
        }
    }
}

impl Validate for RoomConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cleanup_interval_secs == 0 {
            return Err("cleanup_interval_secs must be greater than 0".to_string());
        }
        if self.inactivity_timeout_secs < self.cleanup_interval_secs {
            return Err(
                "inactivity_timeout_secs must not be shorter than cleanup_interval_secs"
                    .to_string(),
            );
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub use_prefix: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            use_prefix: false,
        }
    }
}
