//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use crate::driver::DriverConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// Every value is resolved as CLI > TOML > built-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Driver identifiers and naming convention
    pub driver: DriverConfig,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ hardware_id: {}, deprecated_hardware_id: {}, base_alias: {} }}",
            self.driver.hardware_id, self.driver.deprecated_hardware_id, self.driver.base_alias,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A hardware id is empty or contains whitespace
    /// - Both hardware ids are the same
    /// - The base alias is empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let adapter = toml.map(|t| &t.adapter);

        let hardware_id = cli
            .hardware_id
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.hardware_id.as_deref()))
            .unwrap_or(defaults::HARDWARE_ID);

        let deprecated_hardware_id = cli
            .deprecated_hardware_id
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.deprecated_hardware_id.as_deref()))
            .unwrap_or(defaults::DEPRECATED_HARDWARE_ID);

        let base_alias = cli
            .base_alias
            .as_deref()
            .or_else(|| adapter.and_then(|a| a.base_alias.as_deref()))
            .unwrap_or(defaults::BASE_ALIAS);

        validate_hardware_id(field::HARDWARE_ID, hardware_id)?;
        validate_hardware_id(field::DEPRECATED_HARDWARE_ID, deprecated_hardware_id)?;

        // Hardware ids are compared exactly, so only an exact match collides
        if hardware_id == deprecated_hardware_id {
            return Err(ConfigError::SameHardwareIds(hardware_id.to_string()));
        }

        if base_alias.trim().is_empty() {
            return Err(ConfigError::InvalidBaseAlias(base_alias.to_string()));
        }

        Ok(Self {
            driver: DriverConfig {
                hardware_id: hardware_id.to_string(),
                deprecated_hardware_id: deprecated_hardware_id.to_string(),
                base_alias: base_alias.to_string(),
            },
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_hardware_id(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidHardwareId {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
