//! Configuration Loader
//!
//! Environment-aware loading: compiled defaults, then the base TOML file, then
//! the environment-specific TOML file, then `TASKBOARD__*` variables.

use super::error::ConfigResult;
use super::TaskboardConfig;
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const BASE_FILE_NAME: &str = "taskboard";
const ENV_PREFIX: &str = "TASKBOARD";

pub struct ConfigManager {
    config: TaskboardConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = crate::logging::get_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from("config"));

        debug!(
            environment = %environment,
            directory = %config_directory.display(),
            "Loading configuration"
        );

        let config: TaskboardConfig = Config::builder()
            .add_source(File::from(Self::base_file(&config_directory)).required(false))
            .add_source(
                File::from(Self::environment_file(&config_directory, environment)).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("search.task_fields"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;

        info!(
            environment = %environment,
            max_connections = config.database.max_connections,
            default_per_page = config.pagination.default_per_page,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &TaskboardConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }

    fn base_file(directory: &Path) -> PathBuf {
        directory.join(format!("{BASE_FILE_NAME}.toml"))
    }

    fn environment_file(directory: &Path, environment: &str) -> PathBuf {
        directory.join(format!("{BASE_FILE_NAME}.{environment}.toml"))
    }
}
