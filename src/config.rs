//! Configuration system
//!
//! Centralized configuration with runtime defaults, optional TOML config
//! files, environment variable overrides, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Content API configuration
    pub api: ApiConfig,

    /// Report output configuration
    pub output: OutputConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub post_types: Vec<String>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub filename_prefix: String,
    pub export_views_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub views_file: PathBuf,
    pub output_directory: PathBuf,
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            api: ApiConfig {
                base_url: "https://developer.wordpress.org/news".to_string(),
                post_types: vec![
                    "snippets".to_string(),
                    "dev-blog-videos".to_string(),
                    "posts".to_string(),
                ],
                page: 1,
                per_page: 100,
            },
            output: OutputConfig {
                filename_prefix: "devblognews".to_string(),
                export_views_json: true,
            },
            paths: PathsConfig {
                views_file: PathBuf::from("views.csv"),
                output_directory: PathBuf::from("."),
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("devblog-views.toml"),
            PathBuf::from(".devblog-views.toml"),
            dirs::config_dir()
                .map(|d| d.join("devblog-views").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("DEVBLOG_VIEWS_BASE_URL") {
            self.api.base_url = val;
        }
        if let Ok(val) = env::var("DEVBLOG_VIEWS_POST_TYPES") {
            self.api.post_types = val
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(val) = env::var("DEVBLOG_VIEWS_PAGE") {
            self.api.page = val.parse().context("Invalid DEVBLOG_VIEWS_PAGE")?;
        }
        if let Ok(val) = env::var("DEVBLOG_VIEWS_PER_PAGE") {
            self.api.per_page = val.parse().context("Invalid DEVBLOG_VIEWS_PER_PAGE")?;
        }

        if let Ok(val) = env::var("DEVBLOG_VIEWS_FILE") {
            self.paths.views_file = PathBuf::from(val);
        }
        if let Ok(val) = env::var("DEVBLOG_VIEWS_OUTPUT_DIR") {
            self.paths.output_directory = PathBuf::from(val);
        }
        if let Ok(val) = env::var("DEVBLOG_VIEWS_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("Base URL must not be empty"));
        }

        if self.api.post_types.is_empty() {
            return Err(anyhow::anyhow!("At least one post type must be configured"));
        }
        if self.api.post_types.iter().any(|t| t.trim().is_empty()) {
            return Err(anyhow::anyhow!("Post type names must not be empty"));
        }

        if self.api.page == 0 {
            return Err(anyhow::anyhow!("Page number must be greater than 0"));
        }

        // The upstream API caps page size at 100.
        if self.api.per_page == 0 || self.api.per_page > 100 {
            return Err(anyhow::anyhow!(
                "Page size must be between 1 and 100, got {}",
                self.api.per_page
            ));
        }

        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}
