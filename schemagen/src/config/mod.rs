//! Configuration management for schemagen
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Command-line flags (applied by the CLI on top of the loaded config)
//! 2. Environment variables (`SCHEMAGEN_` prefix, `__` for nesting)
//! 3. An explicit config file (`--config`)
//! 4. `./schemagen.toml`
//! 5. `~/.config/schemagen/config.toml` (user config)
//! 6. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! [connection]
//! host = "db.internal"
//! port = 3306
//! user = "reporting"
//! database = "shop"
//!
//! [output]
//! root = "./generated"
//! namespace = "Shop.Models"
//! generate_constructor_and_output = true
//! key_column = "id"
//!
//! [docs]
//! enabled = true
//! label = "Shop"
//! ```

use crate::emit::class::KeyColumnStrategy;
use crate::error::Result;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Database connection settings
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// User name
    pub user: String,

    /// Password (empty for none)
    pub password: String,

    /// Database (schema) to introspect
    pub database: Option<String>,

    /// Restrict generation to a single table
    pub table: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: None,
            table: None,
        }
    }
}

impl ConnectionSettings {
    /// Connection summary for logs, with the password masked
    #[must_use]
    pub fn redacted(&self) -> String {
        let password = if self.password.is_empty() { "" } else { "*****" };
        format!(
            "Server={};Port={};Uid={};Pwd={};Database={}",
            self.host,
            self.port,
            self.user,
            password,
            self.database.as_deref().unwrap_or_default()
        )
    }

    /// Table filter, treating an empty string as "all tables"
    #[must_use]
    pub fn table_filter(&self) -> Option<&str> {
        self.table.as_deref().filter(|table| !table.is_empty())
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Class generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory all output is written under
    pub root: PathBuf,

    /// File extension of generated classes
    pub extension: String,

    /// Namespace wrapping generated classes
    pub namespace: Option<String>,

    /// Emit the reading constructor and the CRUD statement builders
    pub generate_constructor_and_output: bool,

    /// Key column for UPDATE and DELETE; the first column when unset
    pub key_column: Option<String>,

    /// Directory with `<template>.hbs` overrides
    pub template_dir: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extension: "cs".to_string(),
            namespace: None,
            generate_constructor_and_output: false,
            key_column: None,
            template_dir: None,
        }
    }
}

impl OutputSettings {
    /// Key column policy derived from `key_column`
    #[must_use]
    pub fn key_strategy(&self) -> KeyColumnStrategy {
        match self.key_column.as_deref() {
            Some(column) if !column.is_empty() => KeyColumnStrategy::Explicit(column.to_string()),
            _ => KeyColumnStrategy::FirstColumn,
        }
    }

    /// Namespace, treating an empty string as "no namespace"
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

/// Documentation page settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsSettings {
    /// Emit wiki pages
    pub enabled: bool,

    /// Label used instead of the database name
    pub label: Option<String>,

    /// Wiki directory below the output root
    pub directory: PathBuf,
}

impl Default for DocsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            label: None,
            directory: PathBuf::from("wiki"),
        }
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Connection settings
    #[serde(default)]
    pub connection: ConnectionSettings,

    /// Class generation settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Documentation settings
    #[serde(default)]
    pub docs: DocsSettings,
}

impl GeneratorConfig {
    /// Load configuration from the standard locations
    ///
    /// `extra` is merged after the standard files and before the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - A configuration file cannot be read or parsed
    /// - Configuration values fail type conversion
    pub fn load(extra: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(&toml::to_string(&Self::default())?));

        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        let local_config = PathBuf::from("./schemagen.toml");
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file(require_file(path)?));
        }

        figment = figment.merge(Env::prefixed("SCHEMAGEN_").split("__").lowercase(true));

        let config = figment.extract()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a single file, ignoring the standard locations
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(require_file(path)?))
            .extract()?;

        Ok(config)
    }

    /// User config path: `~/.config/schemagen/config.toml`
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from("./schemagen.toml"),
            |config_dir| config_dir.join("schemagen").join("config.toml"),
        )
    }

    /// Label used in documentation pages
    ///
    /// The configured label, or the database name when unset or empty.
    #[must_use]
    pub fn docs_label(&self) -> Option<&str> {
        self.docs
            .label
            .as_deref()
            .filter(|label| !label.is_empty())
            .or(self.connection.database.as_deref())
    }
}

/// Explicitly named config files must exist
fn require_file(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("config file not found: {}", path.display()),
        )
        .into())
    }
}
