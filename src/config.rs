//! quarry configuration
//!
//! Looked up in order: an explicit path, `$QUARRY_CONFIG`, then
//! `<config dir>/quarry/config.toml`. A missing default file means defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{QuarryError, QuarryResult};
use crate::transpiler::DialectKind;

/// How the CLI prints relationship listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuarryConfig {
    /// Dialect used when none is given on the command line
    pub dialect: DialectKind,

    /// First placeholder index
    pub start_index: usize,

    /// Default catalog file
    pub catalog_path: Option<PathBuf>,

    pub format: OutputFormat,
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::Postgres,
            start_index: 1,
            catalog_path: None,
            format: OutputFormat::Table,
        }
    }
}

impl QuarryConfig {
    pub fn builder() -> QuarryConfigBuilder {
        QuarryConfigBuilder::default()
    }

    pub fn from_toml_str(s: &str) -> QuarryResult<Self> {
        let config: Self = toml::from_str(s)
            .map_err(|e| QuarryError::Config(format!("Failed to parse config: {}", e)))?;
        if config.start_index == 0 {
            return Err(QuarryError::Config("start_index must be at least 1".to_string()));
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> QuarryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuarryError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit or `$QUARRY_CONFIG` path must exist; the default location
    /// is optional.
    pub fn load(explicit: Option<&Path>) -> QuarryResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var("QUARRY_CONFIG") {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quarry").join("config.toml"))
    }
}

/// Builder for QuarryConfig
#[derive(Debug, Default)]
pub struct QuarryConfigBuilder {
    config: QuarryConfig,
}

impl QuarryConfigBuilder {
    pub fn dialect(mut self, dialect: DialectKind) -> Self {
        self.config.dialect = dialect;
        self
    }

    pub fn start_index(mut self, start: usize) -> Self {
        self.config.start_index = start.max(1);
        self
    }

    pub fn catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.catalog_path = Some(path.into());
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn build(self) -> QuarryConfig {
        self.config
    }
}
