//! Enumeration of network adapters created by a specific driver.
//!
//! Enumeration is a finite, lazy sequence that is rebuilt from scratch on
//! every call. Devices whose properties cannot be read are logged and
//! skipped; only failing to obtain or walk the device list aborts a scan.

use std::collections::BTreeSet;

use super::{AdapterRecord, AliasLookup, DeviceError, DeviceList, DeviceManager, StableId};

/// A single pass over a device list yielding adapters of one driver type.
///
/// Yields `Ok(record)` for each fully-read adapter whose hardware identifier
/// equals the filter exactly (case-sensitive). Yields at most one `Err`, for
/// a failure walking the list itself, after which the scan is finished.
///
/// The scan owns the device list, so the OS handle is released when the scan
/// is dropped, however iteration ends.
pub struct AdapterScan<'a, L, A> {
    list: L,
    aliases: &'a A,
    hardware_id: &'a str,
    index: u32,
    finished: bool,
}

impl<'a, L, A> AdapterScan<'a, L, A>
where
    L: DeviceList,
    A: AliasLookup,
{
    /// Creates a scan over an already-opened device list.
    pub const fn new(list: L, aliases: &'a A, hardware_id: &'a str) -> Self {
        Self {
            list,
            aliases,
            hardware_id,
            index: 0,
            finished: false,
        }
    }

    /// Opens a fresh device list and starts a scan over it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the device list cannot be obtained.
    pub fn open<M>(devices: &M, aliases: &'a A, hardware_id: &'a str) -> Result<Self, DeviceError>
    where
        M: DeviceManager<List = L>,
    {
        Ok(Self::new(devices.present_net_devices()?, aliases, hardware_id))
    }

    fn matches_filter(&self, device: &L::Device, index: u32) -> bool {
        match self.list.hardware_id(device) {
            Ok(Some(id)) => id == self.hardware_id,
            Ok(None) => false,
            Err(e) => {
                tracing::debug!(index, "Skipping device with unreadable hardware id: {e}");
                false
            }
        }
    }

    fn read_record(&self, device: &L::Device) -> Result<AdapterRecord, DeviceError> {
        let raw_id = self.list.net_cfg_instance_id(device)?;
        let stable_id = StableId::parse(&raw_id)?;

        Ok(AdapterRecord::new(
            stable_id,
            self.list.driver_description(device)?,
            self.aliases.connection_alias(&stable_id)?,
            self.list.instance_id(device)?,
        ))
    }
}

impl<L, A> Iterator for AdapterScan<'_, L, A>
where
    L: DeviceList,
    A: AliasLookup,
{
    type Item = Result<AdapterRecord, DeviceError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let index = self.index;
            self.index += 1;

            let device = match self.list.device(index) {
                Ok(Some(device)) => device,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            };

            if !self.matches_filter(&device, index) {
                continue;
            }

            match self.read_record(&device) {
                Ok(record) => return Some(Ok(record)),
                Err(e) => {
                    tracing::warn!(
                        index,
                        hardware_id = self.hardware_id,
                        "Skipping adapter due to error while iterating: {e}"
                    );
                }
            }
        }

        None
    }
}

/// Enumerates every present adapter whose hardware identifier equals `hardware_id`.
///
/// An empty set is a valid result. Records are unique by [`StableId`]; should
/// the OS report the same instance twice, the first read wins.
///
/// # Errors
///
/// Returns [`DeviceError`] if the device list cannot be obtained or walked.
/// Failures reading an individual adapter never surface here.
pub fn enumerate_adapters<M, A>(
    devices: &M,
    aliases: &A,
    hardware_id: &str,
) -> Result<BTreeSet<AdapterRecord>, DeviceError>
where
    M: DeviceManager,
    A: AliasLookup,
{
    let mut adapters = BTreeSet::new();

    for record in AdapterScan::open(devices, aliases, hardware_id)? {
        let record = record?;
        if let Some(existing) = adapters.get(&record) {
            tracing::debug!("Ignoring repeated adapter entry: {existing}");
            continue;
        }
        adapters.insert(record);
    }

    tracing::debug!(hardware_id, count = adapters.len(), "Enumerated adapters");

    Ok(adapters)
}

#[cfg(test)]
#[path = "enumerator_tests.rs"]
mod tests;
