//! Tries to create an `AppConfig` from config files and the environment.
//! Layers `config/base.toml`, `config/{environment}.toml` and `APP_` prefixed
//! environment variables with `figment`.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod types;

use std::{path::Path, sync::OnceLock};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

// Re-export config structs
pub use error::{ConfigError, ConfigResult};
pub use types::{AppConfig, Environment, MailchimpConfig, NetConfig, DEFAULT_LIST_ID};

impl AppConfig {
    /// Loads the configuration from the `config` directory inside the current working directory.
    /// The environment is selected with `APP_ENVIRONMENT` and defaults to `local`.
    pub fn load() -> ConfigResult<Self> {
        let base_path = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()?;

        let config = Self::figment(&base_path.join("config"), &environment).extract()?;
        Ok(config)
    }

    /// The layered configuration sources, later ones take precedence.
    /// Environment variables are split on `__`, e.g. `APP_MAILCHIMP_CONFIG__API_KEY`.
    pub fn figment(config_dir: &Path, environment: &Environment) -> Figment {
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        Figment::new()
            .merge(Toml::file(config_dir.join("base.toml")))
            .merge(Toml::file(config_dir.join(environment_filename)))
            .merge(Env::prefixed("APP_").split("__"))
    }
}

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<12} - Initializing the configuration",
            "get_or_init_config"
        );

        AppConfig::load().unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"))
    })
}
