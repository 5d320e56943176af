//! Application configuration.
//!
//! Resolution order: built-in defaults, an optional TOML file, the
//! `DTC_RESOURCE_DIR` / `DTC_MAPPING_DIR` environment variables, and finally
//! whatever the caller overrides (the CLI applies its path flags last).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rules::RuleTable;

/// File name looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dtc.toml";
pub const RESOURCE_DIR_ENV: &str = "DTC_RESOURCE_DIR";
pub const MAPPING_DIR_ENV: &str = "DTC_MAPPING_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Companies and position markers driving the dual-dealer split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualDealerRules {
    pub primary_company: String,
    pub secondary_company: String,
    /// Position keyword that keeps a row with the primary company.
    pub primary_marker: String,
    /// Position keyword that moves a row to the secondary company.
    pub secondary_marker: String,
}

impl Default for DualDealerRules {
    fn default() -> Self {
        Self {
            primary_company: "bdc".to_string(),
            secondary_company: "smc".to_string(),
            primary_marker: "دیزل".to_string(),
            secondary_marker: "سیبا".to_string(),
        }
    }
}

impl DualDealerRules {
    pub fn is_primary_company(&self, company: &str) -> bool {
        company.trim().eq_ignore_ascii_case(self.primary_company.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding `raw.csv`, `dealers.csv`, `after/` and `sales/`.
    pub resource_dir: PathBuf,
    /// Directory holding the mapping CSV files.
    pub mapping_dir: PathBuf,
    pub dual_dealer: DualDealerRules,
    pub criterion_rules: RuleTable,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("res"),
            mapping_dir: PathBuf::from("mappings"),
            dual_dealer: DualDealerRules::default(),
            criterion_rules: RuleTable::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration file and applies environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `dtc.toml` in the working
    /// directory is used when present and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies directory overrides from `lookup`; blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(dir) = non_blank(RESOURCE_DIR_ENV) {
            self.resource_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_blank(MAPPING_DIR_ENV) {
            self.mapping_dir = PathBuf::from(dir);
        }
    }

    pub fn personnel_path(&self) -> PathBuf {
        self.resource_dir.join("raw.csv")
    }

    pub fn dealers_path(&self) -> PathBuf {
        self.resource_dir.join("dealers.csv")
    }

    pub fn after_sales_dir(&self) -> PathBuf {
        self.resource_dir.join("after")
    }

    pub fn sales_dir(&self) -> PathBuf {
        self.resource_dir.join("sales")
    }
}
