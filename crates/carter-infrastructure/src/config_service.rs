//! Client configuration loaded from `config.toml`.

use crate::carter_client::DEFAULT_CARTER_URL;
use crate::paths::CarterPaths;
use crate::storage::AtomicTomlFile;
use carter_core::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Settings read from `~/.config/carter/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Overrides where the library and logs are stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Also write logs to a daily rolling file under the data directory
    pub log_to_file: bool,
    /// Base URL of the Carter API
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: "info".to_string(),
            log_to_file: true,
            api_url: DEFAULT_CARTER_URL.to_string(),
        }
    }
}

/// Loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: CarterPaths,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading `config.toml` under `paths`. Nothing is read yet.
    pub fn new(paths: CarterPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, reading the file on first access.
    ///
    /// A missing file is created with the defaults.
    ///
    /// # Returns
    ///
    /// - `Ok(ClientConfig)`: The cached or freshly loaded configuration
    /// - `Err(CarterError)`: The file exists but could not be read or parsed
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(config) = cached.as_ref() {
                return Ok(config.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cached = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cached = None;
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.paths.config_file()?);
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                file.save(&config)?;
                tracing::info!("[Config] Wrote default config to {:?}", file.path());
                Ok(config)
            }
        }
    }
}
