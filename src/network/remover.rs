//! Targeted removal of a single adapter by stable identifier.

use super::{DeviceError, DeviceList, DeviceManager, StableId};

/// Outcome of a removal pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// Whether the target device was found and removed.
    pub removed: bool,
    /// Number of other adapters of the same driver type still present.
    pub remaining: usize,
}

/// Removes the adapter of `hardware_id` whose stable identifier equals `target`.
///
/// Opens a fresh device list, so the decision is made against live device
/// state rather than an earlier snapshot or positional index. Every other
/// adapter with the same hardware identifier is left in place and counted.
///
/// Devices whose configuration instance identifier is not a well-formed GUID
/// cannot be the target and are counted as remaining.
///
/// # Errors
///
/// Returns [`DeviceError`] if the list cannot be opened or walked, if a
/// matching device's properties cannot be read, or if the removal itself
/// fails. Nothing is retried.
pub fn remove_by_stable_id<M>(
    devices: &M,
    hardware_id: &str,
    target: &StableId,
) -> Result<RemovalOutcome, DeviceError>
where
    M: DeviceManager,
{
    let list = devices.present_net_devices()?;
    let mut outcome = RemovalOutcome {
        removed: false,
        remaining: 0,
    };

    for index in 0.. {
        let Some(device) = list.device(index)? else {
            break;
        };

        if list.hardware_id(&device)?.as_deref() != Some(hardware_id) {
            continue;
        }

        let raw_id = list.net_cfg_instance_id(&device)?;
        let is_target = StableId::parse(&raw_id).is_ok_and(|id| id == *target);

        if !is_target {
            outcome.remaining += 1;
            continue;
        }

        list.remove(&device)?;
        outcome.removed = true;
        tracing::info!(stable_id = %target, index, "Removed adapter");
    }

    Ok(outcome)
}
