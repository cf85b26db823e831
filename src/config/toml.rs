//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Adapter identification section
    #[serde(default)]
    pub adapter: AdapterSection,
}

/// Adapter identification section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterSection {
    /// Hardware id of the current TAP driver
    pub hardware_id: Option<String>,

    /// Hardware id of the deprecated TAP driver
    pub deprecated_hardware_id: Option<String>,

    /// Base connection alias
    pub base_alias: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# driverlogic Configuration File

[adapter]
# Hardware id of the current TAP driver (default: "tapmullvad0901")
# hardware_id = "tapmullvad0901"

# Hardware id of the deprecated TAP driver (default: "tap0901")
# deprecated_hardware_id = "tap0901"

# Base connection alias (default: "Mullvad")
# Adapters named "<base>" or "<base>-0" through "<base>-9" belong to this application.
# base_alias = "Mullvad"
"#
    .to_string()
}
