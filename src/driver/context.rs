//! Long-lived adapter context held across boundary calls.

use std::collections::BTreeSet;

use crate::network::{AdapterRecord, AliasLookup, DeviceManager, resolve_by_naming_convention};

use super::logic::exactly_one;
use super::{AdapterError, DriverLogic};

/// Classification of the adapters present when a baseline is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineStatus {
    /// No adapter of the current driver is present.
    NoAdaptersPresent,
    /// Adapters are present but none follows the naming convention.
    SomeAdaptersPresent,
    /// An adapter following the naming convention is already present.
    OwnAdapterPresent,
}

/// Adapter set of one driver type captured at a point in time.
#[derive(Debug, Clone)]
struct Snapshot {
    hardware_id: String,
    adapters: BTreeSet<AdapterRecord>,
}

/// State carried between an installer's `initialize` and `deinitialize` calls.
///
/// The context holds snapshots only, never live device handles. A snapshot
/// may be stale by the time it is used.
#[derive(Debug, Clone, Default)]
pub struct DriverContext {
    baseline: Option<Snapshot>,
    current: Option<Snapshot>,
}

impl DriverContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current-driver adapters present before installation.
    ///
    /// Replaces any earlier baseline and discards any recorded current state.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Device`] if enumeration fails.
    pub fn establish_baseline<M, A>(
        &mut self,
        logic: &DriverLogic<M, A>,
    ) -> Result<BaselineStatus, AdapterError>
    where
        M: DeviceManager,
        A: AliasLookup,
    {
        let snapshot = take_snapshot(logic)?;

        let status = if snapshot.adapters.is_empty() {
            BaselineStatus::NoAdaptersPresent
        } else if resolve_by_naming_convention(&snapshot.adapters, &logic.config().base_alias)
            .is_some()
        {
            BaselineStatus::OwnAdapterPresent
        } else {
            BaselineStatus::SomeAdaptersPresent
        };

        tracing::debug!(?status, count = snapshot.adapters.len(), "Baseline established");

        self.baseline = Some(snapshot);
        self.current = None;
        Ok(status)
    }

    /// Records the current-driver adapters present after installation.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Device`] if enumeration fails.
    pub fn record_current_state<M, A>(
        &mut self,
        logic: &DriverLogic<M, A>,
    ) -> Result<(), AdapterError>
    where
        M: DeviceManager,
        A: AliasLookup,
    {
        self.current = Some(take_snapshot(logic)?);
        Ok(())
    }

    /// Returns the single adapter present now that was absent from the baseline.
    ///
    /// Adapters are compared by stable identifier, so an adapter that was
    /// renamed between the two snapshots is not considered new.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NoBaseline`] / [`AdapterError::NoCurrentState`] if
    ///   either snapshot is missing
    /// - [`AdapterError::NotFound`] if no adapter was added
    /// - [`AdapterError::Ambiguous`] if more than one was added
    pub fn new_adapter(&self) -> Result<AdapterRecord, AdapterError> {
        let baseline = self.baseline.as_ref().ok_or(AdapterError::NoBaseline)?;
        let current = self.current.as_ref().ok_or(AdapterError::NoCurrentState)?;

        let added: BTreeSet<AdapterRecord> = current
            .adapters
            .difference(&baseline.adapters)
            .cloned()
            .collect();

        exactly_one(added, &current.hardware_id, "New network TAP adapters")
    }

    /// Records the current state and returns the newly added adapter.
    ///
    /// # Errors
    ///
    /// See [`record_current_state`](Self::record_current_state) and
    /// [`new_adapter`](Self::new_adapter).
    pub fn identify_new_adapter<M, A>(
        &mut self,
        logic: &DriverLogic<M, A>,
    ) -> Result<AdapterRecord, AdapterError>
    where
        M: DeviceManager,
        A: AliasLookup,
    {
        self.record_current_state(logic)?;
        self.new_adapter()
    }

    /// Adapters recorded in the baseline, if one was established.
    #[must_use]
    pub fn baseline(&self) -> Option<&BTreeSet<AdapterRecord>> {
        self.baseline.as_ref().map(|s| &s.adapters)
    }
}

fn take_snapshot<M, A>(logic: &DriverLogic<M, A>) -> Result<Snapshot, AdapterError>
where
    M: DeviceManager,
    A: AliasLookup,
{
    let hardware_id = logic.config().hardware_id.clone();
    let adapters = logic.adapters(&hardware_id)?;

    Ok(Snapshot {
        hardware_id,
        adapters,
    })
}
