//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Calculation engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Calculation engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Work days per week used to derive a daily target from a tariff's
    /// weekly hours when neither the tariff nor the day plan provides one.
    #[serde(default = "default_work_days_per_week")]
    pub work_days_per_week: u8,
    /// Threads for batch recalculation. `None` uses the global rayon pool.
    #[serde(default)]
    pub batch_threads: Option<usize>,
}

fn default_work_days_per_week() -> u8 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_days_per_week: default_work_days_per_week(),
            batch_threads: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default.toml`, `config/{RUN_MODE}.toml`, `TIMELEDGER__*` env vars.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TIMELEDGER").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if !(1..=7).contains(&self.engine.work_days_per_week) {
            return Err(config::ConfigError::Message(format!(
                "engine.work_days_per_week must be between 1 and 7, got {}",
                self.engine.work_days_per_week
            )));
        }
        if self.engine.batch_threads == Some(0) {
            return Err(config::ConfigError::Message(
                "engine.batch_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
