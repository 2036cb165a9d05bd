use super::{
    evolution::EvolutionConfig,
    search::SearchConfig,
    traits::ConfigSection,
    walk_forward::WalkForwardConfig,
};
use crate::error::EvoForecastError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment overrides, e.g. `EVOFORECAST__EVOLUTION__SEED=7`
pub const ENV_PREFIX: &str = "EVOFORECAST";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub walk_forward: WalkForwardConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvoForecastError> {
        self.evolution.validate()?;
        self.walk_forward.validate()?;
        self.search.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoForecastError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EvoForecastError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| {
                EvoForecastError::Configuration(format!("Failed to parse config: {}", e))
            })?;

        self.replace(config)
    }

    /// TOML file overlaid with `EVOFORECAST__<SECTION>__<FIELD>` variables
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoForecastError> {
        let path = path.as_ref().to_string_lossy().to_string();

        let settings = config::Config::builder()
            .add_source(config::File::new(&path, config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EvoForecastError::Configuration(format!("Failed to load config: {}", e)))?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(|e| {
                EvoForecastError::Configuration(format!("Failed to parse config: {}", e))
            })?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvoForecastError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| EvoForecastError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| {
                EvoForecastError::Configuration(format!("Failed to write config: {}", e))
            })?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Apply `f` to a copy; the stored config only changes if the result validates
    pub fn update<F>(&self, f: F) -> Result<(), EvoForecastError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.get();
        f(&mut config);
        self.replace(config)
    }

    fn replace(&self, config: AppConfig) -> Result<(), EvoForecastError> {
        config.validate()?;
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
        Ok(())
    }
}
