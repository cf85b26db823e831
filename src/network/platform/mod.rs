//! Platform-specific device manager implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`DeviceManager`](super::DeviceManager) and
//! [`AliasLookup`](super::AliasLookup) traits.
//!
//! # Platform Support
//!
//! - **Windows**: `SetupAPI` for device enumeration and removal, the device
//!   registry key for `NetCfgInstanceId`, and IP Helper for connection aliases.
//! - Other platforms have no TAP driver and no implementation.

mod wide;

#[cfg(windows)]
mod windows;

pub use wide::{first_wide_string, wide_bytes_to_units};

#[cfg(windows)]
pub use windows::{DevInfoList, IpHelperAliases, SetupApiDevices};

// Re-export platform-specific implementations under generic names for convenience
#[cfg(windows)]
pub use windows::IpHelperAliases as PlatformAliases;
#[cfg(windows)]
pub use windows::SetupApiDevices as PlatformDevices;
