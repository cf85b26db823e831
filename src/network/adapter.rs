//! Core types for adapter representation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::DeviceError;

/// Configuration instance identifier of a network adapter (`NetCfgInstanceId`).
///
/// Assigned by the OS configuration subsystem and stable across reboots for
/// the same device instance. This is the only key that may be used to
/// correlate an adapter across two separate enumeration passes.
///
/// Displays in the registry's braced upper-case form, e.g.
/// `{2C5E4B9A-0F3D-4A7E-9B21-6D8C0E1F2A3B}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StableId(Uuid);

impl StableId {
    /// Parses a GUID string, braced or not, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidStableId`] if the string is not a
    /// well-formed GUID.
    pub fn parse(value: &str) -> Result<Self, DeviceError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|source| DeviceError::InvalidStableId {
                value: value.to_string(),
                source,
            })
    }

    /// Returns the identifier as a UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for StableId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for StableId {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0.braced())
    }
}

impl Serialize for StableId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A network adapter created by a specific driver, as seen in one enumeration pass.
///
/// Records are values: they are built fresh on every enumeration and never
/// mutated afterwards. They are snapshots, not live handles.
///
/// # Equality
///
/// Equality and ordering are defined by [`StableId`] alone, so a
/// `BTreeSet<AdapterRecord>` deduplicates by device instance rather than by
/// alias or description.
#[derive(Debug, Clone, Serialize)]
pub struct AdapterRecord {
    stable_id: StableId,
    driver_description: String,
    connection_alias: String,
    device_instance_id: String,
}

impl AdapterRecord {
    /// Creates a new adapter record.
    #[must_use]
    pub fn new(
        stable_id: StableId,
        driver_description: impl Into<String>,
        connection_alias: impl Into<String>,
        device_instance_id: impl Into<String>,
    ) -> Self {
        Self {
            stable_id,
            driver_description: driver_description.into(),
            connection_alias: connection_alias.into(),
            device_instance_id: device_instance_id.into(),
        }
    }

    /// The adapter's stable configuration instance identifier.
    #[must_use]
    pub const fn stable_id(&self) -> &StableId {
        &self.stable_id
    }

    /// Human-readable driver description. Not unique.
    #[must_use]
    pub fn driver_description(&self) -> &str {
        &self.driver_description
    }

    /// User-visible connection name, e.g. "Mullvad" or "Ethernet 3".
    #[must_use]
    pub fn connection_alias(&self) -> &str {
        &self.connection_alias
    }

    /// Device instance id from the enumeration pass that produced this record.
    ///
    /// Only meaningful within that pass; never compare it across passes.
    #[must_use]
    pub fn device_instance_id(&self) -> &str {
        &self.device_instance_id
    }
}

impl PartialEq for AdapterRecord {
    fn eq(&self, other: &Self) -> bool {
        self.stable_id == other.stable_id
    }
}

impl Eq for AdapterRecord {}

impl PartialOrd for AdapterRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AdapterRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.stable_id.cmp(&other.stable_id)
    }
}

impl fmt::Display for AdapterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, \"{}\")",
            self.stable_id, self.driver_description, self.connection_alias
        )
    }
}
