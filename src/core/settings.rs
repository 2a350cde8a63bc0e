//! Run settings and the persisted API key

use crate::error::ScrapeError;
use crate::platform::client::{HttpClientConfig, DEFAULT_API_BASE};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default directory holding `config.json`
pub const DEFAULT_CONFIG_DIR: &str = "settings";
/// Default directory snapshots are written to
pub const DEFAULT_DATA_DIR: &str = "data";
/// File name of the persisted config inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

const API_KEY_FIELD: &str = "api_key";

/// Everything a run needs to know about its environment
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding `config.json`
    pub config_dir: PathBuf,
    /// Directory snapshots are written to
    pub data_dir: PathBuf,
    /// API root URL
    pub api_base: String,
    /// HTTP timeout
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Settings {
    /// Set config directory
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Set snapshot directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set API root URL
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Set HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Path of the config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Config store rooted at [`Settings::config_path`]
    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(self.config_path())
    }

    /// HTTP client configuration for these settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: self.timeout,
            base_url: self.api_base.clone(),
            ..Default::default()
        }
    }
}

/// JSON key-value file holding the API key.
///
/// Keys other than `api_key` are kept as they are when the file is rewritten.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored API key, or the empty string when the file or field is absent
    pub fn load_api_key(&self) -> Result<String, ScrapeError> {
        let config = self.read()?;
        Ok(config
            .get(API_KEY_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    /// Store `key`, creating the file and its directory if needed
    pub fn set_api_key(&self, key: &str) -> Result<(), ScrapeError> {
        let mut config = self.read()?;
        config.insert(API_KEY_FIELD.to_string(), Value::String(key.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, to_pretty_json(&config)?)?;
        info!("API key updated in {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Result<Map<String, Value>, ScrapeError> {
        if !self.path.exists() {
            debug!("No config at {}", self.path.display());
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Pretty JSON with 4-space indentation; non-ASCII is written as-is
pub fn to_pretty_json<T>(value: &T) -> Result<Vec<u8>, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
