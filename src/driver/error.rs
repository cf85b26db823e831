//! Error types for the driver layer.

use thiserror::Error;

use crate::network::{AdapterRecord, DeviceError, StableId};

/// Error type for adapter identification and removal.
///
/// Domain failures (`NotFound`, `Ambiguous`, `NotResolved`) are distinct from
/// OS failures (`Device`, `Removal`) so callers can report them differently.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// No adapter of the driver type is present.
    #[error("No adapter with hardware id '{hardware_id}' was found")]
    NotFound {
        /// The hardware identifier that was searched for.
        hardware_id: String,
    },

    /// More adapters were present than the single one expected.
    ///
    /// Every candidate is carried so the caller can report them; none is
    /// ever picked on the caller's behalf.
    #[error("Identified more adapters than expected: {count} with hardware id '{hardware_id}'", count = .candidates.len())]
    Ambiguous {
        /// The hardware identifier that was searched for.
        hardware_id: String,
        /// All adapters that matched.
        candidates: Vec<AdapterRecord>,
    },

    /// No adapter's connection alias follows the naming convention.
    #[error("No adapter with hardware id '{hardware_id}' is named after '{base_alias}'")]
    NotResolved {
        /// The hardware identifier that was searched for.
        hardware_id: String,
        /// The base connection name that was looked for.
        base_alias: String,
    },

    /// A new adapter was requested before any baseline was established.
    #[error("No adapter baseline has been established")]
    NoBaseline,

    /// A new adapter was requested before the current state was recorded.
    #[error("Current adapter state has not been recorded")]
    NoCurrentState,

    /// Enumerating adapters failed.
    #[error("Failed to enumerate adapters: {0}")]
    Device(#[from] DeviceError),

    /// The removal pass for an identified adapter failed.
    #[error("Failed to remove adapter {stable_id}: {source}")]
    Removal {
        /// The adapter that was being removed.
        stable_id: StableId,
        /// Underlying device error.
        #[source]
        source: DeviceError,
    },
}

impl AdapterError {
    /// Returns true if this error reports more than one candidate adapter.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}
