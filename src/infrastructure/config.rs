//! Configuration infrastructure
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. Optional config file (TOML, JSON or YAML by extension)
//! 3. `FLIPKART_SCRAPER__*` environment variables, `__` between nesting
//!    levels (e.g. `FLIPKART_SCRAPER__HTTP__TIMEOUT_SECONDS=20`)

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::http_client::HttpClientConfig;
use super::parsing::{ParsingConfig, ProductDetailParser, ProductListParser};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    Load {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpClientConfig,
    pub logging: LoggingConfig,
    pub parsing: ParsingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (always stderr)
    pub console_output: bool,

    /// Enable daily rolling file output
    pub file_output: bool,

    /// Directory for log files; platform data dir when unset
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let module_filters = defaults::QUIET_MODULES
            .iter()
            .map(|module| ((*module).to_string(), "warn".to_string()))
            .collect();

        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: false,
            log_dir: None,
            module_filters,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file, and the environment.
    ///
    /// `path` wins over `FLIPKART_SCRAPER_CONFIG`, which wins over the
    /// platform config directory. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let environment = config::Environment::with_prefix(defaults::ENV_PREFIX)
            .separator(defaults::ENV_SEPARATOR)
            .try_parsing(true);
        let path = path.map(Path::to_path_buf).or_else(config_file_path);

        Self::load_from(path.as_deref(), environment)
    }

    fn load_from(path: Option<&Path>, environment: config::Environment) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading config from: {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder.add_source(environment).build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                message: "http.timeout_seconds must be greater than 0".to_string(),
            });
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "http.user_agent cannot be empty".to_string(),
            });
        }

        if self.parsing.search_heuristics.min_name_chars > self.parsing.search_heuristics.max_name_chars {
            return Err(ConfigError::Validation {
                message: "min_name_chars cannot be greater than max_name_chars".to_string(),
            });
        }

        ProductDetailParser::with_config(&self.parsing.product_detail_selectors).map_err(|e| {
            ConfigError::Validation {
                message: e.to_string(),
            }
        })?;
        ProductListParser::with_config(&self.parsing.search_selectors, &self.parsing.search_heuristics)
            .map_err(|e| ConfigError::Validation {
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Get the application configuration directory
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR_NAME))
}

/// Config file named by `FLIPKART_SCRAPER_CONFIG`, else `<config dir>/flipkart-scraper/config`
pub fn config_file_path() -> Option<PathBuf> {
    std::env::var_os(defaults::CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .or_else(|| config_dir().map(|dir| dir.join(defaults::CONFIG_FILE_STEM)))
}

/// Default values
pub mod defaults {
    pub const APP_DIR_NAME: &str = "flipkart-scraper";
    pub const CONFIG_FILE_STEM: &str = "config";
    pub const CONFIG_PATH_ENV: &str = "FLIPKART_SCRAPER_CONFIG";
    pub const ENV_PREFIX: &str = "FLIPKART_SCRAPER";
    pub const ENV_SEPARATOR: &str = "__";

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_FILE_PREFIX: &str = "flipkart-scraper.log";

    /// Dependencies that are chatty below `warn`
    pub const QUIET_MODULES: &[&str] = &["reqwest", "hyper", "hyper_util", "html5ever", "selectors"];
}
