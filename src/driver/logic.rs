//! Identification and removal of this application's TAP adapter.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::defaults;
use crate::network::{
    AdapterRecord, AliasLookup, DeviceManager, enumerate_adapters, remove_by_stable_id,
    resolve_by_naming_convention,
};

use super::AdapterError;

/// Driver identifiers and naming convention used to find "our" adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Hardware id of the current TAP driver.
    pub hardware_id: String,
    /// Hardware id of the deprecated TAP driver.
    pub deprecated_hardware_id: String,
    /// Base connection alias, e.g. "Mullvad".
    pub base_alias: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            hardware_id: defaults::HARDWARE_ID.to_string(),
            deprecated_hardware_id: defaults::DEPRECATED_HARDWARE_ID.to_string(),
            base_alias: defaults::BASE_ALIAS.to_string(),
        }
    }
}

impl fmt::Display for DriverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DriverConfig {{ hardware_id: {}, deprecated_hardware_id: {}, base_alias: {} }}",
            self.hardware_id, self.deprecated_hardware_id, self.base_alias
        )
    }
}

/// Result of removing the deprecated adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionResult {
    /// No other adapters of the deprecated driver remain.
    NoneRemaining,
    /// Other adapters of the deprecated driver are still present.
    SomeRemaining,
}

/// Stateless adapter operations over an OS device manager.
///
/// Every call enumerates from scratch; nothing is cached between calls.
#[derive(Debug)]
pub struct DriverLogic<M, A> {
    devices: M,
    aliases: A,
    config: DriverConfig,
}

impl<M, A> DriverLogic<M, A>
where
    M: DeviceManager,
    A: AliasLookup,
{
    /// Creates driver logic over the given device manager and alias lookup.
    pub const fn new(devices: M, aliases: A, config: DriverConfig) -> Self {
        Self {
            devices,
            aliases,
            config,
        }
    }

    /// Returns the driver configuration.
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Enumerates present adapters with the given hardware id.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Device`] if the device list cannot be obtained.
    pub fn adapters(&self, hardware_id: &str) -> Result<BTreeSet<AdapterRecord>, AdapterError> {
        Ok(enumerate_adapters(&self.devices, &self.aliases, hardware_id)?)
    }

    /// Returns the single adapter of the current driver.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NotFound`] if no adapter is present
    /// - [`AdapterError::Ambiguous`] if more than one is present; every
    ///   candidate is logged first
    /// - [`AdapterError::Device`] if enumeration fails
    pub fn get_adapter(&self) -> Result<AdapterRecord, AdapterError> {
        let hardware_id = &self.config.hardware_id;
        let adapters = self.adapters(hardware_id)?;

        exactly_one(adapters, hardware_id, "Enumerable network TAP adapters")
    }

    /// Removes the deprecated-driver adapter that follows the naming convention.
    ///
    /// The target is identified in one enumeration pass and removed in a
    /// second, fresh pass by matching its stable identifier. Other adapters
    /// of the deprecated driver are left in place.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NotResolved`] if no adapter follows the naming convention
    /// - [`AdapterError::Device`] if the first enumeration fails
    /// - [`AdapterError::Removal`] if the removal pass fails
    pub fn delete_deprecated_adapter(&self) -> Result<DeletionResult, AdapterError> {
        let hardware_id = &self.config.deprecated_hardware_id;
        let adapters = self.adapters(hardware_id)?;

        let target = resolve_by_naming_convention(&adapters, &self.config.base_alias)
            .ok_or_else(|| AdapterError::NotResolved {
                hardware_id: hardware_id.clone(),
                base_alias: self.config.base_alias.clone(),
            })?;
        let stable_id = *target.stable_id();

        tracing::info!("Removing deprecated adapter {target}");

        let outcome = remove_by_stable_id(&self.devices, hardware_id, &stable_id)
            .map_err(|source| AdapterError::Removal { stable_id, source })?;

        if !outcome.removed {
            tracing::warn!(
                stable_id = %stable_id,
                "Adapter disappeared before it could be removed"
            );
        }

        tracing::info!(remaining = outcome.remaining, "Deprecated adapter removal finished");

        Ok(if outcome.remaining > 0 {
            DeletionResult::SomeRemaining
        } else {
            DeletionResult::NoneRemaining
        })
    }
}

/// Returns the only adapter in `adapters`.
///
/// Zero adapters is `NotFound`. More than one is `Ambiguous`, after every
/// candidate has been logged under `description`.
pub(crate) fn exactly_one(
    adapters: BTreeSet<AdapterRecord>,
    hardware_id: &str,
    description: &str,
) -> Result<AdapterRecord, AdapterError> {
    if adapters.len() > 1 {
        log_adapters(description, &adapters);

        return Err(AdapterError::Ambiguous {
            hardware_id: hardware_id.to_string(),
            candidates: adapters.into_iter().collect(),
        });
    }

    adapters
        .into_iter()
        .next()
        .ok_or_else(|| AdapterError::NotFound {
            hardware_id: hardware_id.to_string(),
        })
}

/// Logs every adapter's identifying details.
pub(crate) fn log_adapters(description: &str, adapters: &BTreeSet<AdapterRecord>) {
    tracing::warn!(count = adapters.len(), "{description}");

    for adapter in adapters {
        tracing::warn!(
            guid = %adapter.stable_id(),
            description = adapter.driver_description(),
            alias = adapter.connection_alias(),
            "Adapter"
        );
    }
}

#[cfg(test)]
#[path = "logic_tests.rs"]
mod tests;
