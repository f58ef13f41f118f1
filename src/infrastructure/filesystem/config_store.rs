use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::debug;

use crate::common::error::ReleaseError;
use crate::common::result::{ReleaseResult, ResultExt};
use crate::domain::entities::release_config::ReleaseConfig;

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "relmgr.yaml";

/// Reads and writes `relmgr.yaml` files
#[derive(Debug, Clone, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Path of the default configuration file inside `dir`
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join(DEFAULT_CONFIG_FILE)
    }

    /// Read and parse a configuration file
    pub async fn load<P: AsRef<Path>>(&self, path: P) -> ReleaseResult<ReleaseConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ReleaseError::config_error(
                format!("configuration file not found: {}", path.display()),
                Some(path.to_path_buf()),
            ));
        }

        let content = async_fs::read_to_string(path)
            .await
            .with_filesystem_error("failed to read configuration", Some(path.to_path_buf()))?;

        let config = Self::parse(&content).map_err(|e| match e {
            ReleaseError::SerializationError { message, source } => ReleaseError::ConfigError {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;

        debug!(path = %path.display(), "Loaded release configuration");
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> ReleaseResult<ReleaseConfig> {
        if content.trim().is_empty() {
            return Ok(ReleaseConfig::default());
        }

        serde_yaml::from_str(content).map_err(|e| {
            ReleaseError::serialization_error_with_source("invalid configuration YAML", e)
        })
    }

    /// Read a flat task configuration file (a YAML mapping of scalars).
    ///
    /// Scalar values are kept as their string form, so `true` and `"true"`
    /// are the same; `null` becomes an empty string.
    pub async fn load_task_map<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ReleaseResult<HashMap<String, String>> {
        let path = path.as_ref();
        let content = async_fs::read_to_string(path)
            .await
            .with_filesystem_error("failed to read task configuration", Some(path.to_path_buf()))?;

        Self::parse_task_map(&content).map_err(|e| match e {
            ReleaseError::SerializationError { message, source } => ReleaseError::ConfigError {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parse a flat task configuration from YAML text
    pub fn parse_task_map(content: &str) -> ReleaseResult<HashMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(content).map_err(|e| {
            ReleaseError::serialization_error_with_source("invalid task configuration YAML", e)
        })?;

        raw.into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_yaml::Value::Null => String::new(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::String(s) => s,
                    _ => {
                        return Err(ReleaseError::validation_error(
                            key,
                            "task configuration values must be scalars",
                            None,
                        ))
                    }
                };
                Ok((key, value))
            })
            .collect()
    }

    /// Serialize and write a configuration file, creating parent directories
    pub async fn save<P: AsRef<Path>>(&self, path: P, config: &ReleaseConfig) -> ReleaseResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                async_fs::create_dir_all(parent)
                    .await
                    .with_filesystem_error(
                        "failed to create configuration directory",
                        Some(parent.to_path_buf()),
                    )?;
            }
        }

        let yaml = serde_yaml::to_string(config)?;
        async_fs::write(path, yaml)
            .await
            .with_filesystem_error("failed to write configuration", Some(path.to_path_buf()))?;

        debug!(path = %path.display(), "Saved release configuration");
        Ok(())
    }
}
