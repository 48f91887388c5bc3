//! Configuration module for linkwatch.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::watch::SourceRouting;
use crate::{LinkwatchError, Result};

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the tracked links file.
    #[serde(default = "default_links_file")]
    pub links_file: String,
    /// Path to the saved articles file.
    #[serde(default = "default_articles_file")]
    pub articles_file: String,
}

fn default_links_file() -> String {
    "saved_links.json".to_string()
}

fn default_articles_file() -> String {
    "saved_articles.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            articles_file: default_articles_file(),
        }
    }
}

/// HTTP fetch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Connection timeout in seconds. Unset leaves the client default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Total request timeout in seconds. Unset leaves the client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Maximum number of redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum response body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
}

fn default_user_agent() -> String {
    concat!("linkwatch/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_redirects() -> usize {
    10
}

fn default_max_body_bytes() -> u64 {
    10 * 1024 * 1024 // 10MB
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: None,
            timeout_secs: None,
            max_redirects: default_max_redirects(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Article source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// How a link is routed to the feed reader or the page scraper.
    #[serde(default)]
    pub routing: SourceRouting,
    /// Hard cap on feed pages followed in one call.
    #[serde(default = "default_max_feed_pages")]
    pub max_feed_pages: usize,
    /// Maximum number of elements taken from a scraped page.
    #[serde(default = "default_max_scraped_elements")]
    pub max_scraped_elements: usize,
}

fn default_max_feed_pages() -> usize {
    50
}

fn default_max_scraped_elements() -> usize {
    50
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            routing: SourceRouting::default(),
            max_feed_pages: default_max_feed_pages(),
            max_scraped_elements: default_max_scraped_elements(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Number of articles shown per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    5
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/linkwatch.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Article source configuration.
    #[serde(default)]
    pub sources: SourcesConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(LinkwatchError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| LinkwatchError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `LINKWATCH_DATA_DIR`: directory holding both storage files
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("LINKWATCH_DATA_DIR") {
            if !dir.is_empty() {
                self.relocate_storage(&dir);
            }
        }
    }

    /// Move both storage files into `dir`, keeping their file names.
    fn relocate_storage(&mut self, dir: &str) {
        let relocate = |file: &str| {
            let name = Path::new(file)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(file));
            Path::new(dir).join(name).to_string_lossy().into_owned()
        };
        self.storage.links_file = relocate(&self.storage.links_file);
        self.storage.articles_file = relocate(&self.storage.articles_file);
    }
}
