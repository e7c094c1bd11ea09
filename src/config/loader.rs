//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::api::{ApiSettings, DEFAULT_BASE_URL};
use crate::config::validation::parse_collection_id;
use crate::download::DownloaderConfig;
use crate::error::{Error, Result};

/// Name of the configuration file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Raindrop.io access token.
    #[serde(default)]
    pub api_key: String,
}

/// Download options configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Collection to download: numeric ID or collection URL.
    #[serde(default)]
    pub collection: Option<String>,

    /// Directory the collection folder is created in. Must already exist.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Whether to write a `.info.json` file next to each image.
    #[serde(default = "default_true")]
    pub write_info_json: bool,

    /// Whether to show a progress bar for large downloads.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            collection: None,
            output_directory: None,
            write_info_json: true,
            show_progress: true,
        }
    }
}

/// HTTP settings for the Raindrop API and asset downloads.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    format!("raindrop-images-dl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default configuration file location for this platform.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "raindrop", "raindrop-images-dl")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Settings for the API client.
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            api_key: self.account.api_key.clone(),
            base_url: self.api.base_url.clone(),
            user_agent: self.api.user_agent.clone(),
            timeout: self.timeout(),
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    /// Build the downloader configuration.
    ///
    /// A missing collection or output directory is passed through as zero / empty
    /// so the downloader reports it.
    pub fn downloader_config(&self) -> Result<DownloaderConfig> {
        let collection_id = match self.options.collection.as_deref() {
            Some(collection) => parse_collection_id(collection)?,
            None => 0,
        };

        Ok(DownloaderConfig {
            collection_id,
            output_dir: self.options.output_directory.clone().unwrap_or_default(),
            write_info_json: self.options.write_info_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[account]
api_key = "abc-123"

[options]
collection = "https://app.raindrop.io/my/4567"
output_directory = "/data/images"
write_info_json = false

[api]
base_url = "http://localhost:8080/rest/v1"
timeout_seconds = 5
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.account.api_key, "abc-123");
        assert!(!config.options.write_info_json);
        assert!(config.options.show_progress);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.api.user_agent.starts_with("raindrop-images-dl/"));

        let dl = config.downloader_config().unwrap();
        assert_eq!(dl.collection_id, 4567);
        assert_eq!(dl.output_dir, PathBuf::from("/data/images"));
        assert!(!dl.write_info_json);
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.options.write_info_json);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_seconds, 60);

        let dl = config.downloader_config().unwrap();
        assert_eq!(dl.collection_id, 0);
        assert!(dl.output_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[options\ncollection = ").unwrap();
        assert!(matches!(Config::load(&path), Err(Error::TomlParse(_))));
    }
}
