use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GateError, Result};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "publish-gate.toml";

/// Represents the complete configuration for publish-gate.
///
/// Contains the status endpoint, version rules, package index and the shell
/// steps run once the gate opens.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub status: StatusConfig,

    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub steps: StepsConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_status_url() -> String {
    "http://pulp/pulp/api/v3/status/".to_string()
}

fn default_components() -> Vec<String> {
    vec!["ansible".to_string(), "pulp_ansible".to_string()]
}

/// Where the reported component version comes from.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StatusConfig {
    #[serde(default = "default_status_url")]
    pub url: String,

    /// Component names to accept, in priority order (plugin name, legacy name).
    #[serde(default = "default_components")]
    pub components: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        StatusConfig {
            url: default_status_url(),
            components: default_components(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_dev_marker() -> String {
    ".dev".to_string()
}

fn default_tag_pattern() -> String {
    "{version}".to_string()
}

/// Rules for turning a reported version into a publishable one.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default = "default_dev_marker")]
    pub dev_marker: String,

    /// Release tag naming, must contain `{version}`.
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            dev_marker: default_dev_marker(),
            tag_pattern: default_tag_pattern(),
        }
    }
}

/// Package index flavours with a known per-version URL layout.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    #[default]
    Pypi,
    Rubygems,
    Custom,
}

fn default_package() -> String {
    "pulp-ansible-client".to_string()
}

/// Package index used for the idempotency check.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    #[serde(default)]
    pub kind: IndexKind,

    #[serde(default = "default_package")]
    pub package: String,

    /// Overrides the scheme and host of the index (mirrors, tests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Required when `kind = "custom"`; uses `{package}` and `{version}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_template: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            kind: IndexKind::default(),
            package: default_package(),
            base_url: None,
            url_template: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Shell command lines run by the gate, each through `sh -c`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct StepsConfig {
    #[serde(default)]
    pub build: Vec<String>,

    #[serde(default)]
    pub upload: Vec<String>,

    /// Run instead of build/upload when the version is already published.
    #[serde(default)]
    pub install_existing: Vec<String>,
}

impl Config {
    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.status.components.is_empty() {
            return Err(GateError::config("[status] components must not be empty"));
        }
        if self.version.dev_marker.trim().is_empty() {
            return Err(GateError::config("[version] dev_marker must not be empty"));
        }
        if !self.version.tag_pattern.contains("{version}") {
            return Err(GateError::config(format!(
                "[version] tag_pattern '{}' must contain {{version}}",
                self.version.tag_pattern
            )));
        }
        if self.index.package.trim().is_empty() {
            return Err(GateError::config("[index] package must not be empty"));
        }
        if self.index.kind == IndexKind::Custom && self.index.url_template.is_none() {
            return Err(GateError::config(
                "[index] url_template is required when kind = \"custom\"",
            ));
        }
        Ok(())
    }

    /// Renders the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| GateError::config(format!("Cannot serialize config: {}", e)))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `publish-gate.toml` in current directory
/// 3. `publish-gate.toml` in user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| GateError::config(format!("Cannot parse config: {}", e)))?;
    config.validate()?;
    log::debug!("Loaded configuration: {:?}", config);
    Ok(config)
}
