//! Project and user configuration.
//!
//! Project settings live in `<project>/.cablepath/config.toml` and describe
//! where the link list and connector membership are read from. User settings
//! live in `<config_dir>/cablepath/config.toml` and hold personal defaults
//! (database path, output mode). Missing files yield defaults.
//!
//! Table and column names end up inside SQL text, so [`ProjectConfig::validate`]
//! only accepts plain identifiers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;
use crate::path::DEFAULT_LINK_WEIGHT;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_link_view")]
    pub view: String,
    #[serde(default = "default_start_column")]
    pub start_column: String,
    #[serde(default = "default_end_column")]
    pub end_column: String,
    #[serde(default = "default_direction_column")]
    pub direction_column: String,
    #[serde(default = "default_link_weight")]
    pub default_weight: u32,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            view: default_link_view(),
            start_column: default_start_column(),
            end_column: default_end_column(),
            direction_column: default_direction_column(),
            default_weight: default_link_weight(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorsConfig {
    #[serde(default = "default_connection_table")]
    pub table: String,
    #[serde(default = "default_connection_column")]
    pub connection_column: String,
    #[serde(default = "default_connector_column")]
    pub connector_column: String,
}

impl Default for ConnectorsConfig {
    fn default() -> Self {
        Self {
            table: default_connection_table(),
            connection_column: default_connection_column(),
            connector_column: default_connector_column(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub database: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<String>,
}

/// A table or column name that is not a plain SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier for {key}: {value:?}")]
pub struct InvalidIdentifier {
    pub key: &'static str,
    pub value: String,
}

impl InvalidIdentifier {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::InvalidIdentifier
    }
}

impl ProjectConfig {
    /// Check every table and column name.
    ///
    /// # Errors
    ///
    /// Returns the first name that is not a plain identifier.
    pub fn validate(&self) -> Result<(), InvalidIdentifier> {
        self.links.validate()?;
        self.connectors.validate()
    }
}

impl LinksConfig {
    /// # Errors
    ///
    /// Returns the first name that is not a plain identifier.
    pub fn validate(&self) -> Result<(), InvalidIdentifier> {
        check_identifiers([
            ("links.view", &self.view),
            ("links.start_column", &self.start_column),
            ("links.end_column", &self.end_column),
            ("links.direction_column", &self.direction_column),
        ])
    }
}

impl ConnectorsConfig {
    /// # Errors
    ///
    /// Returns the first name that is not a plain identifier.
    pub fn validate(&self) -> Result<(), InvalidIdentifier> {
        check_identifiers([
            ("connectors.table", &self.table),
            ("connectors.connection_column", &self.connection_column),
            ("connectors.connector_column", &self.connector_column),
        ])
    }
}

fn check_identifiers<const N: usize>(names: [(&'static str, &String); N]) -> Result<(), InvalidIdentifier> {
    for (key, value) in names {
        if !is_sql_identifier(value) {
            return Err(InvalidIdentifier {
                key,
                value: value.clone(),
            });
        }
    }
    Ok(())
}

/// `true` for `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Load `<project_root>/.cablepath/config.toml`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".cablepath/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_config_file(&path)
}

/// Load a project config from an explicit path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/cablepath/config.toml`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("cablepath/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_link_view() -> String {
    "LinkList_view".to_string()
}

fn default_start_column() -> String {
    "UnitConnectionStart_Id_FK".to_string()
}

fn default_end_column() -> String {
    "UnitConnectionEnd_Id_FK".to_string()
}

fn default_direction_column() -> String {
    "LinkDirection_Code_FK".to_string()
}

const fn default_link_weight() -> u32 {
    DEFAULT_LINK_WEIGHT
}

fn default_connection_table() -> String {
    "UnitConnection_tbl".to_string()
}

fn default_connection_column() -> String {
    "Id_PK".to_string()
}

fn default_connector_column() -> String {
    "UnitConnector_Id_FK".to_string()
}
