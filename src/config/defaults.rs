//! Default values for configuration options.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Hardware id of the current TAP driver.
pub const HARDWARE_ID: &str = "tapmullvad0901";

/// Hardware id of the deprecated TAP driver.
pub const DEPRECATED_HARDWARE_ID: &str = "tap0901";

/// Base connection alias of this application's adapter.
pub const BASE_ALIAS: &str = "Mullvad";

/// Highest numeric suffix tried after the bare base alias.
///
/// Not configurable: it follows the suffixes Windows appends when
/// de-duplicating connection names.
pub const MAX_ALIAS_SUFFIX: u32 = 9;

/// File name written by `init` when no output path is given.
pub const CONFIG_FILE_NAME: &str = "driverlogic.toml";
