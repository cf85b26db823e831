//! Network layer for enumerating, identifying, and removing TAP adapters.
//!
//! This module provides types and functions for:
//! - Representing adapters of one driver type ([`AdapterRecord`], [`StableId`])
//! - Abstracting the OS device manager ([`DeviceManager`], [`DeviceList`], [`AliasLookup`])
//! - Enumerating adapters by hardware identifier ([`enumerate_adapters`], [`AdapterScan`])
//! - Resolving "our" adapter by naming convention ([`resolve_by_naming_convention`])
//! - Removing one adapter by stable identifier ([`remove_by_stable_id`])
//! - Platform-specific implementations ([`platform`])

mod adapter;
mod device;
mod enumerator;
pub mod platform;
mod remover;
mod resolver;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use adapter::{AdapterRecord, StableId};
pub use device::{AliasLookup, DeviceError, DeviceList, DeviceManager};
pub use enumerator::{AdapterScan, enumerate_adapters};
pub use remover::{RemovalOutcome, remove_by_stable_id};
pub use resolver::{MAX_ALIAS_SUFFIX, candidate_aliases, resolve_by_naming_convention};
