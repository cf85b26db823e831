//! In-memory device manager shared by tests across the crate.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::{AliasLookup, DeviceError, DeviceList, DeviceManager, StableId};

pub const TAP_ID: &str = "tapmullvad0901";
pub const OLD_TAP_ID: &str = "tap0901";

pub const GUID_A: &str = "{2C5E4B9A-0F3D-4A7E-9B21-6D8C0E1F2A3B}";
pub const GUID_B: &str = "{8F14E45F-CEEA-467A-9575-1B2C3D4E5F60}";
pub const GUID_C: &str = "{C4CA4238-A0B9-4382-8DCC-509A6F75849B}";
pub const GUID_D: &str = "{ECCBC87E-4B5C-42FE-A830-8FD9F2A7BAF3}";

/// A device as the fake OS reports it. `None` properties fail to read.
#[derive(Debug, Clone)]
pub struct FakeDevice {
    pub instance_id: String,
    pub hardware_id: Option<String>,
    pub hardware_id_unreadable: bool,
    pub net_cfg_instance_id: Option<String>,
    pub description: Option<String>,
    pub alias: Option<String>,
    pub fail_removal: bool,
}

impl FakeDevice {
    /// A fully readable adapter.
    pub fn adapter(hardware_id: &str, guid: &str, alias: &str) -> Self {
        Self {
            instance_id: format!("ROOT\\NET\\{}", &guid[1..9]),
            hardware_id: Some(hardware_id.to_string()),
            hardware_id_unreadable: false,
            net_cfg_instance_id: Some(guid.to_string()),
            description: Some("TAP-Windows Adapter V9".to_string()),
            alias: Some(alias.to_string()),
            fail_removal: false,
        }
    }

    /// A device with no hardware id at all (e.g. a physical NIC stub).
    pub fn without_hardware_id(guid: &str) -> Self {
        Self {
            hardware_id: None,
            ..Self::adapter("", guid, "Ethernet")
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn without_description(mut self) -> Self {
        self.description = None;
        self
    }

    pub fn without_alias(mut self) -> Self {
        self.alias = None;
        self
    }

    pub fn with_net_cfg_instance_id(mut self, value: Option<&str>) -> Self {
        self.net_cfg_instance_id = value.map(str::to_string);
        self
    }

    pub fn with_unreadable_hardware_id(mut self) -> Self {
        self.hardware_id_unreadable = true;
        self
    }

    pub fn failing_removal(mut self) -> Self {
        self.fail_removal = true;
        self
    }
}

#[derive(Debug, Default)]
struct FakeState {
    devices: Vec<FakeDevice>,
    fail_open: bool,
    panic_on_open: bool,
    reverse_on_reopen: bool,
    opened: usize,
    released: usize,
    removed: Vec<String>,
}

/// Fake OS device manager and alias service.
///
/// Clones share state, so a test can keep one handle for inspection while
/// the code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeDevices {
    state: Rc<RefCell<FakeState>>,
}

impl FakeDevices {
    pub fn new(devices: Vec<FakeDevice>) -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                devices,
                ..FakeState::default()
            })),
        }
    }

    /// Makes opening the device list fail.
    pub fn failing_open(self) -> Self {
        self.state.borrow_mut().fail_open = true;
        self
    }

    /// Makes the next device list request panic.
    pub fn panicking_open(self) -> Self {
        self.state.borrow_mut().panic_on_open = true;
        self
    }

    /// Reverses device order on every second list opened.
    pub fn reversing_on_reopen(self) -> Self {
        self.state.borrow_mut().reverse_on_reopen = true;
        self
    }

    pub fn add(&self, device: FakeDevice) {
        self.state.borrow_mut().devices.push(device);
    }

    pub fn opened(&self) -> usize {
        self.state.borrow().opened
    }

    pub fn released(&self) -> usize {
        self.state.borrow().released
    }

    /// Instance ids of removed devices, in removal order.
    pub fn removed(&self) -> Vec<String> {
        self.state.borrow().removed.clone()
    }

    pub fn remaining_instance_ids(&self) -> Vec<String> {
        self.state
            .borrow()
            .devices
            .iter()
            .map(|d| d.instance_id.clone())
            .collect()
    }
}

impl DeviceManager for FakeDevices {
    type List = FakeList;

    fn present_net_devices(&self) -> Result<FakeList, DeviceError> {
        let mut state = self.state.borrow_mut();
        if state.panic_on_open {
            state.panic_on_open = false;
            drop(state);
            panic!("device manager exploded");
        }
        if state.fail_open {
            return Err(DeviceError::platform("SetupDiGetClassDevs", "access denied"));
        }

        let mut snapshot = state.devices.clone();
        if state.reverse_on_reopen && state.opened % 2 == 1 {
            snapshot.reverse();
        }
        state.opened += 1;

        Ok(FakeList {
            snapshot,
            state: Rc::clone(&self.state),
        })
    }
}

impl AliasLookup for FakeDevices {
    fn connection_alias(&self, id: &StableId) -> Result<String, DeviceError> {
        self.state
            .borrow()
            .devices
            .iter()
            .find(|d| {
                d.net_cfg_instance_id
                    .as_deref()
                    .and_then(|raw| StableId::parse(raw).ok())
                    .is_some_and(|parsed| parsed == *id)
            })
            .and_then(|d| d.alias.clone())
            .ok_or_else(|| {
                DeviceError::platform("ConvertInterfaceGuidToLuid", format!("no interface for {id}"))
            })
    }
}

/// One opened list; records its own release on drop.
#[derive(Debug)]
pub struct FakeList {
    snapshot: Vec<FakeDevice>,
    state: Rc<RefCell<FakeState>>,
}

impl Drop for FakeList {
    fn drop(&mut self) {
        self.state.borrow_mut().released += 1;
    }
}

impl DeviceList for FakeList {
    type Device = FakeDevice;

    fn device(&self, index: u32) -> Result<Option<FakeDevice>, DeviceError> {
        Ok(self.snapshot.get(index as usize).cloned())
    }

    fn hardware_id(&self, device: &FakeDevice) -> Result<Option<String>, DeviceError> {
        if device.hardware_id_unreadable {
            return Err(DeviceError::platform(
                "SetupDiGetDeviceRegistryPropertyW",
                "device is being removed",
            ));
        }
        Ok(device.hardware_id.clone())
    }

    fn net_cfg_instance_id(&self, device: &FakeDevice) -> Result<String, DeviceError> {
        device
            .net_cfg_instance_id
            .clone()
            .ok_or(DeviceError::MissingProperty {
                property: "NetCfgInstanceId",
            })
    }

    fn driver_description(&self, device: &FakeDevice) -> Result<String, DeviceError> {
        device
            .description
            .clone()
            .ok_or_else(|| DeviceError::platform("SetupDiGetDevicePropertyW", "not found"))
    }

    fn instance_id(&self, device: &FakeDevice) -> Result<String, DeviceError> {
        Ok(device.instance_id.clone())
    }

    fn remove(&self, device: &FakeDevice) -> Result<(), DeviceError> {
        if device.fail_removal {
            return Err(DeviceError::platform("SetupDiRemoveDevice", "access denied"));
        }

        let mut state = self.state.borrow_mut();
        state.devices.retain(|d| d.instance_id != device.instance_id);
        state.removed.push(device.instance_id.clone());
        Ok(())
    }
}

/// Parses a GUID fixture.
pub fn stable_id(guid: &str) -> StableId {
    StableId::parse(guid).unwrap()
}

/// In-memory log sink for asserting on emitted tracing events.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    /// Runs `f` with a subscriber that writes every event into this sink.
    pub fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
