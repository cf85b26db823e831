//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A hardware id is empty or contains whitespace.
    #[error("Invalid hardware id for {field}: '{value}'")]
    InvalidHardwareId {
        /// Name of the field
        field: &'static str,
        /// The rejected value
        value: String,
    },

    /// The current and deprecated hardware ids are the same.
    #[error("Current and deprecated hardware ids must differ, both are '{0}'")]
    SameHardwareIds(String),

    /// The base alias is empty or only whitespace.
    #[error("Invalid base alias '{0}': must not be empty")]
    InvalidBaseAlias(String),
}

/// Well-known field names for `InvalidHardwareId` errors.
pub mod field {
    /// The current driver hardware id.
    pub const HARDWARE_ID: &str = "hardware_id";
    /// The deprecated driver hardware id.
    pub const DEPRECATED_HARDWARE_ID: &str = "deprecated_hardware_id";
}
