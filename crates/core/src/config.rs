//! TOML-based configuration system for Rollbook.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RollbookError};

/// Top-level Rollbook configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbookConfig {
    pub rollbook: RollbookSection,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Core Rollbook instance settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollbookSection {
    pub instance_name: String,
    pub data_dir: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

/// SQLite database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: Some("/var/lib/rollbook/rollbook.db".into()),
        }
    }
}

/// Upload handling configuration. Uploaded files are retained under this
/// directory after import.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UploadConfig {
    /// Directory for retained uploads. Defaults to `<data_dir>/uploads`.
    #[serde(default)]
    pub dir: Option<String>,
}

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

impl RollbookConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| RollbookError::Config(format!("failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Validate the configuration, returning an error for invalid combinations.
    pub fn validate(&self) -> Result<()> {
        if self.rollbook.instance_name.is_empty() {
            return Err(RollbookError::Config(
                "rollbook.instance_name must not be empty".into(),
            ));
        }

        if self.rollbook.data_dir.is_empty() {
            return Err(RollbookError::Config(
                "rollbook.data_dir must not be empty".into(),
            ));
        }

        if self.rollbook.database.path.is_none() {
            return Err(RollbookError::Config(
                "rollbook.database.path is required".into(),
            ));
        }

        Ok(())
    }

    /// The directory where uploaded files are retained. Falls back to
    /// `<data_dir>/uploads` when not configured explicitly.
    pub fn upload_dir(&self) -> PathBuf {
        match &self.rollbook.uploads.dir {
            Some(dir) => PathBuf::from(dir),
            None => Path::new(&self.rollbook.data_dir).join("uploads"),
        }
    }

    /// Generate a sensible default configuration.
    pub fn generate_default() -> Self {
        Self {
            rollbook: RollbookSection {
                instance_name: "My School".into(),
                data_dir: "/var/lib/rollbook".into(),
                database: DatabaseConfig::default(),
                uploads: UploadConfig::default(),
            },
            server: ServerConfig::default(),
        }
    }
}
