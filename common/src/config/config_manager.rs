use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches one config value. A missing source yields
/// `TConfig::default()` without caching it, so a file created later is
/// still picked up.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized)?;

        let mut current = self
            .config
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())?;
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InMemoryConfigProvider;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        size: u32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self { size: 10 }
        }
    }

    impl Validate for Sample {
        fn validate(&self) -> Result<(), String> {
            if self.size == 0 {
                return Err("size must be greater than 0".to_string());
            }
            Ok(())
        }
    }

    fn manager(content: Option<&str>) -> ConfigManager<InMemoryConfigProvider, Sample> {
        ConfigManager::new(
            InMemoryConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer::new(),
        )
    }

    #[test]
    fn test_missing_content_yields_default() {
        assert_eq!(manager(None).get_config().unwrap(), Sample::default());
    }

    #[test]
    fn test_stored_yaml_is_parsed() {
        assert_eq!(manager(Some("size: 15\n")).get_config().unwrap(), Sample { size: 15 });
    }

    #[test]
    fn test_invalid_config_is_rejected_on_load_and_save() {
        let manager = manager(Some("size: 0\n"));
        let err = manager.get_config().unwrap_err();
        assert!(err.contains("Config validation error"));
        assert!(manager.set_config(&Sample { size: 0 }).is_err());
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let manager = manager(None);
        manager.set_config(&Sample { size: 19 }).unwrap();
        assert_eq!(manager.get_config().unwrap(), Sample { size: 19 });
        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("size: 19"));
    }

    #[test]
    fn test_file_provider_round_trips_through_disk() {
        let mut path = std::env::temp_dir();
        path.push(format!("gomoku_config_test_{}.yaml", uuid::Uuid::new_v4()));
        let manager: ConfigManager<FileContentConfigProvider, Sample> =
            ConfigManager::from_yaml_file(path.clone());

        assert_eq!(manager.get_config().unwrap(), Sample::default());
        manager.set_config(&Sample { size: 13 }).unwrap();

        let reloaded: ConfigManager<FileContentConfigProvider, Sample> =
            ConfigManager::from_yaml_file(path.clone());
        assert_eq!(reloaded.get_config().unwrap(), Sample { size: 13 });

        let _ = std::fs::remove_file(path);
    }
}
