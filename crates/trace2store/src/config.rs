//! Exporter configuration, read from the environment as JSON.
//!
//! ```json
//! {"store": {"type": "file", "dir": "/var/lib/traces"}}
//! ```

use std::env::VarError;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::exporter::TraceStoreExporter;
use crate::store::{FileStore, MemoryStore, TraceStore};

/// The environment variable holding the JSON-encoded [`ExporterConfig`].
pub const CONFIG_ENV: &str = "TRACESTORE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("parse exporter config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{} is not valid unicode", CONFIG_ENV)]
    NotUnicode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExporterConfig {
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[default]
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "file")]
    File { dir: PathBuf },
}

impl ExporterConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads the config from [`CONFIG_ENV`]. An unset or empty variable
    /// yields the default config, which stores traces in memory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(CONFIG_ENV))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, ConfigError> {
        match value {
            Ok(s) if !s.trim().is_empty() => Self::from_json(&s),
            Ok(_) | Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
        }
    }

    pub async fn build_store(&self) -> anyhow::Result<Arc<dyn TraceStore>> {
        let store: Arc<dyn TraceStore> = match &self.store {
            StoreConfig::Memory => Arc::new(MemoryStore::new()),
            StoreConfig::File { dir } => Arc::new(FileStore::open(dir.clone()).await?),
        };
        log::debug!("using {:?} trace store", self.store);
        Ok(store)
    }

    pub async fn build_exporter(&self) -> anyhow::Result<TraceStoreExporter> {
        Ok(TraceStoreExporter::new(self.build_store().await?))
    }
}
