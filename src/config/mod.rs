//! Configuration layer for driverlogic.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the `[adapter]` section
//! 3. **Built-in defaults** - The Mullvad TAP driver ids and base alias
//!
//! # Fixed Parameters
//!
//! The alias suffix range (`-0` through `-9`) is not user-configurable.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{AdapterSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
