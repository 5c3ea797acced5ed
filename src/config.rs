//! File-backed application settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{core::store::StoreConfig, patient::BreachBinaryPolicy};

/// Default backing file name.
pub const DEFAULT_DATA_FILE: &str = "AED4weeks.csv";
/// Default audit log name.
pub const DEFAULT_LOG_FILE: &str = "activity_log.txt";
/// Default histogram bar count.
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 30;

/// Failure to read a settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("reading {}: {source}", path.display())]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`AppConfig`].
    #[error("parsing {}: {source}", path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Paths and knobs for one run. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backing CSV file.
    pub data_file: PathBuf,
    /// Audit log file.
    pub log_file: PathBuf,
    /// Dashboard histogram bar count.
    pub histogram_buckets: usize,
    /// Whether updates refresh the derived breach value.
    pub breach_binary: BreachBinaryPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
            breach_binary: BreachBinaryPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Parses TOML settings.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads TOML settings from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            breach_binary: self.breach_binary,
        }
    }
}
