//! Device-manager abstraction and error types.

use super::StableId;
use thiserror::Error;

/// Error type for OS device queries.
///
/// Describes what went wrong without dictating recovery strategy.
/// The enumerator treats these as per-device skips; the removal pass
/// treats them as fatal.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Windows API call failed.
    #[cfg(windows)]
    #[error("{operation} failed: {source}")]
    WindowsApi {
        /// Name of the failing API call.
        operation: &'static str,
        /// Underlying OS error, including its code.
        #[source]
        source: windows::core::Error,
    },

    /// Platform-specific error with a generic message.
    #[error("{operation} failed: {message}")]
    Platform {
        /// Name of the failing operation.
        operation: &'static str,
        /// Error message describing the failure.
        message: String,
    },

    /// The configuration instance identifier is not a well-formed GUID.
    #[error("Malformed stable identifier '{value}': {source}")]
    InvalidStableId {
        /// The raw value read from the device.
        value: String,
        /// Underlying parse error.
        #[source]
        source: uuid::Error,
    },

    /// A required device property is not present.
    #[error("Device property '{property}' is not present")]
    MissingProperty {
        /// Name of the missing property.
        property: &'static str,
    },
}

impl DeviceError {
    /// Creates a `Platform` error for the named operation.
    #[must_use]
    pub fn platform(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Platform {
            operation,
            message: message.into(),
        }
    }

    /// Wraps a Windows error with the name of the failing call.
    #[cfg(windows)]
    #[must_use]
    pub const fn windows(operation: &'static str, source: windows::core::Error) -> Self {
        Self::WindowsApi { operation, source }
    }
}

/// Access to the OS list of present network-class devices.
///
/// # Design
///
/// - Each call to [`present_net_devices`](Self::present_net_devices) opens a
///   fresh list; nothing is shared between calls
/// - The returned list owns its OS handle and releases it on drop, so every
///   exit path (success, skip, or error) cleans up
/// - Enables dependency injection for testing with in-memory devices
pub trait DeviceManager {
    /// The live device list type.
    type List: DeviceList;

    /// Opens a list of every present device in the network device class.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the list itself cannot be obtained. This is
    /// the only enumeration failure that aborts a whole scan.
    fn present_net_devices(&self) -> Result<Self::List, DeviceError>;
}

/// One enumeration session over present network-class devices.
///
/// Device values are only valid against the list that produced them and
/// only for the lifetime of that list. Positions are not stable across two
/// lists.
pub trait DeviceList {
    /// Per-device handle within this list.
    type Device;

    /// Returns the device at `index`, or `None` once the list is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the OS fails to enumerate the entry.
    fn device(&self, index: u32) -> Result<Option<Self::Device>, DeviceError>;

    /// Reads the device's hardware identifier.
    ///
    /// For multi-string properties this is the first entry. Returns
    /// `Ok(None)` when the device has no hardware identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the property exists but cannot be read.
    fn hardware_id(&self, device: &Self::Device) -> Result<Option<String>, DeviceError>;

    /// Reads the raw configuration instance identifier from the driver key.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the driver key or value cannot be read.
    fn net_cfg_instance_id(&self, device: &Self::Device) -> Result<String, DeviceError>;

    /// Reads the driver description property.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the property cannot be read.
    fn driver_description(&self, device: &Self::Device) -> Result<String, DeviceError>;

    /// Reads the device instance id, valid for this session only.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the id cannot be read.
    fn instance_id(&self, device: &Self::Device) -> Result<String, DeviceError>;

    /// Removes the device from the system.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the OS refuses or fails the removal.
    fn remove(&self, device: &Self::Device) -> Result<(), DeviceError>;
}

/// Maps a stable adapter identifier to its current connection alias.
pub trait AliasLookup {
    /// Returns the user-visible connection name of the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if no interface exists for the identifier or
    /// its alias cannot be read.
    fn connection_alias(&self, id: &StableId) -> Result<String, DeviceError>;
}
