//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// driverlogic: TAP adapter maintenance
///
/// Finds this application's TAP adapter and removes the adapter left
/// behind by the deprecated TAP driver.
#[derive(Debug, Parser)]
#[command(name = "driverlogic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Hardware id of the current TAP driver
    #[arg(long = "hardware-id", global = true)]
    pub hardware_id: Option<String>,

    /// Hardware id of the deprecated TAP driver
    #[arg(long = "deprecated-hardware-id", global = true)]
    pub deprecated_hardware_id: Option<String>,

    /// Base connection alias of this application's adapter
    #[arg(long = "base-alias", global = true)]
    pub base_alias: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for driverlogic
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },

    /// List present adapters of the current driver
    List {
        /// List adapters of the deprecated driver instead
        #[arg(long)]
        deprecated: bool,

        /// Print adapters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the alias of the single current-driver adapter
    FindAdded,

    /// Remove this application's deprecated-driver adapter
    RemoveDeprecated,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
