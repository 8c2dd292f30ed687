//! Config loading, validation, and path resolution.

use super::model::{FETCHER_BINARY, FetcherConfig};
use crate::error::{FetcherError, Result};
use std::path::{Path, PathBuf};

impl FetcherConfig {
    /// Config pointing at an explicit launcher directory, without home paths.
    pub fn with_launcher_dir<P: AsRef<Path>>(launcher_dir: P) -> Self {
        Self {
            launcher_dir: launcher_dir.as_ref().to_path_buf(),
            frameworks_home: None,
            hadoop_home: None,
        }
    }

    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FetcherError::Configuration(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: FetcherConfig = serde_yaml::from_str(yaml).map_err(|e| {
            FetcherError::Configuration(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            FetcherError::Configuration(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `launcher_dir` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.launcher_dir.as_os_str().is_empty() {
            return Err(FetcherError::Configuration(
                "config validation failed: launcher_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Full path of the fetcher executable.
    pub fn fetcher_path(&self) -> PathBuf {
        self.launcher_dir.join(FETCHER_BINARY)
    }
}
