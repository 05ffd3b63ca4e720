use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::model::document::SeedDocument;

const ENV_CONFIG_PATH: &str = "SCREENING_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Markers that make the compliance officer flag a document
const DEFAULT_SUSPICION_MARKERS: &[&str] = &["expired", "mismatch", "suspicious"];

fn default_suspicion_markers() -> Vec<String> {
    DEFAULT_SUSPICION_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Verdict service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningConfig {
    /// Terms the model is told to treat as signs of fraud
    #[serde(default = "default_suspicion_markers")]
    pub suspicion_markers: Vec<String>,
    /// Optional upper bound on one screening call. Unset keeps the HTTP client default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            suspicion_markers: default_suspicion_markers(),
            request_timeout_secs: None,
        }
    }
}

impl ScreeningConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Verification queue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Documents present when the service starts
    #[serde(default = "SeedDocument::demo_set")]
    pub documents: Vec<SeedDocument>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            documents: SeedDocument::demo_set(),
        }
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub screening: ScreeningConfig,
    #[serde(default)]
    pub queue: QueueConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub screening: ScreeningConfig,
    pub queue: QueueConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screening: ScreeningConfig::default(),
            queue: QueueConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self {
            screening: file.screening,
            queue: file.queue,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse_config_file(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    /// Parse YAML contents; an empty file yields the defaults
    fn parse_config_file(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
