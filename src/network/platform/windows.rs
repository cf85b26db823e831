//! Windows device enumeration using `SetupAPI`, and alias lookup using IP Helper.

use windows::Win32::Devices::DeviceAndDriverInstallation::{
    DICS_FLAG_GLOBAL, DIGCF_PRESENT, DIREG_DRV, GUID_DEVCLASS_NET, HDEVINFO, SP_DEVINFO_DATA,
    SPDRP_HARDWAREID, SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInfo, SetupDiGetClassDevsW,
    SetupDiGetDeviceInstanceIdW, SetupDiGetDevicePropertyW, SetupDiGetDeviceRegistryPropertyW,
    SetupDiOpenDevRegKey, SetupDiRemoveDevice,
};
use windows::Win32::Devices::Properties::{DEVPKEY_Device_DriverDesc, DEVPROPTYPE};
use windows::Win32::Foundation::{
    ERROR_INSUFFICIENT_BUFFER, ERROR_INVALID_DATA, ERROR_NO_MORE_ITEMS, WIN32_ERROR,
};
use windows::Win32::NetworkManagement::IpHelper::{
    ConvertInterfaceGuidToLuid, ConvertInterfaceLuidToAlias,
};
use windows::Win32::NetworkManagement::Ndis::NET_LUID_LH;
use windows::Win32::System::Registry::{HKEY, KEY_READ, RRF_RT_REG_SZ, RegCloseKey, RegGetValueW};
use windows::core::{GUID, PCWSTR, w};

use super::wide::{first_wide_string, wide_bytes_to_units};
use crate::network::{AliasLookup, DeviceError, DeviceList, DeviceManager, StableId};

/// Maximum length of an interface alias, excluding the terminator.
/// Value of `NDIS_IF_MAX_STRING_SIZE` from `ifdef.h`.
const IF_MAX_STRING_SIZE: usize = 256;

/// Buffer size, in UTF-16 units, for the `NetCfgInstanceId` registry value.
/// A braced GUID needs 39 units; `MAX_PATH` leaves ample room.
const INSTANCE_ID_BUFFER_UNITS: usize = 261;

/// Windows implementation of [`DeviceManager`] over the network device class.
///
/// # Example
///
/// ```no_run
/// use driverlogic::network::enumerate_adapters;
/// use driverlogic::network::platform::{IpHelperAliases, SetupApiDevices};
///
/// let adapters = enumerate_adapters(&SetupApiDevices::new(), &IpHelperAliases::new(), "tap0901")
///     .expect("Failed to enumerate adapters");
///
/// for adapter in adapters {
///     println!("{adapter}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SetupApiDevices {
    _private: (),
}

impl SetupApiDevices {
    /// Creates a new `SetupAPI` device manager.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl DeviceManager for SetupApiDevices {
    type List = DevInfoList;

    fn present_net_devices(&self) -> Result<DevInfoList, DeviceError> {
        // SAFETY: GUID_DEVCLASS_NET is a static; no enumerator or window is passed.
        let handle = unsafe {
            SetupDiGetClassDevsW(Some(&GUID_DEVCLASS_NET), PCWSTR::null(), None, DIGCF_PRESENT)
        }
        .map_err(|e| DeviceError::windows("SetupDiGetClassDevsW", e))?;

        Ok(DevInfoList { handle })
    }
}

/// An open device information set. Destroyed on drop.
#[derive(Debug)]
pub struct DevInfoList {
    handle: HDEVINFO,
}

impl Drop for DevInfoList {
    fn drop(&mut self) {
        // SAFETY: the handle came from SetupDiGetClassDevsW and is destroyed exactly once.
        if let Err(e) = unsafe { SetupDiDestroyDeviceInfoList(self.handle) } {
            tracing::debug!("SetupDiDestroyDeviceInfoList failed: {e}");
        }
    }
}

impl DevInfoList {
    /// Reads a string registry property, returning `None` if it is absent.
    fn registry_string_property(
        &self,
        device: &SP_DEVINFO_DATA,
        property: windows::Win32::Devices::DeviceAndDriverInstallation::SETUP_DI_REGISTRY_PROPERTY,
    ) -> Result<Option<String>, DeviceError> {
        let mut required = 0u32;

        // SAFETY: size probe with no output buffer.
        let probe = unsafe {
            SetupDiGetDeviceRegistryPropertyW(
                self.handle,
                device,
                property,
                None,
                None,
                Some(&raw mut required),
            )
        };

        match probe {
            Ok(()) => {}
            Err(e) if is_win32(&e, ERROR_INSUFFICIENT_BUFFER) => {}
            // ERROR_INVALID_DATA is how SetupAPI reports a property that does not exist
            Err(e) if is_win32(&e, ERROR_INVALID_DATA) => return Ok(None),
            Err(e) => return Err(DeviceError::windows("SetupDiGetDeviceRegistryPropertyW", e)),
        }

        let mut buffer = vec![0u8; required as usize + 2];

        // SAFETY: the buffer is at least the size the probe asked for.
        unsafe {
            SetupDiGetDeviceRegistryPropertyW(
                self.handle,
                device,
                property,
                None,
                Some(&mut buffer),
                None,
            )
        }
        .map_err(|e| DeviceError::windows("SetupDiGetDeviceRegistryPropertyW", e))?;

        Ok(Some(first_wide_string(&wide_bytes_to_units(&buffer))))
    }
}

impl DeviceList for DevInfoList {
    type Device = SP_DEVINFO_DATA;

    fn device(&self, index: u32) -> Result<Option<SP_DEVINFO_DATA>, DeviceError> {
        let mut data = SP_DEVINFO_DATA {
            cbSize: size_of::<SP_DEVINFO_DATA>() as u32,
            ..Default::default()
        };

        // SAFETY: `data` is initialized with its size as SetupAPI requires.
        match unsafe { SetupDiEnumDeviceInfo(self.handle, index, &raw mut data) } {
            Ok(()) => Ok(Some(data)),
            Err(e) if is_win32(&e, ERROR_NO_MORE_ITEMS) => Ok(None),
            Err(e) => Err(DeviceError::windows("SetupDiEnumDeviceInfo", e)),
        }
    }

    fn hardware_id(&self, device: &SP_DEVINFO_DATA) -> Result<Option<String>, DeviceError> {
        self.registry_string_property(device, SPDRP_HARDWAREID)
    }

    fn net_cfg_instance_id(&self, device: &SP_DEVINFO_DATA) -> Result<String, DeviceError> {
        // SAFETY: `device` belongs to this list; the key is closed by RegKey's drop.
        let key = unsafe {
            SetupDiOpenDevRegKey(
                self.handle,
                device,
                DICS_FLAG_GLOBAL,
                0,
                DIREG_DRV,
                KEY_READ.0,
            )
        }
        .map(RegKey)
        .map_err(|e| DeviceError::windows("SetupDiOpenDevRegKey", e))?;

        let mut buffer = [0u16; INSTANCE_ID_BUFFER_UNITS];
        let mut size = u32::try_from(size_of_val(&buffer)).unwrap_or(u32::MAX);

        // SAFETY: `size` is the byte length of `buffer`.
        unsafe {
            RegGetValueW(
                key.0,
                PCWSTR::null(),
                w!("NetCfgInstanceId"),
                RRF_RT_REG_SZ,
                None,
                Some(buffer.as_mut_ptr().cast()),
                Some(&raw mut size),
            )
        }
        .ok()
        .map_err(|e| DeviceError::windows("RegGetValueW", e))?;

        Ok(first_wide_string(&buffer))
    }

    fn driver_description(&self, device: &SP_DEVINFO_DATA) -> Result<String, DeviceError> {
        let mut property_type = DEVPROPTYPE::default();
        let mut required = 0u32;

        // SAFETY: size probe with no output buffer.
        let probe = unsafe {
            SetupDiGetDevicePropertyW(
                self.handle,
                device,
                &DEVPKEY_Device_DriverDesc,
                &raw mut property_type,
                None,
                Some(&raw mut required),
                0,
            )
        };

        if let Err(e) = probe {
            if !is_win32(&e, ERROR_INSUFFICIENT_BUFFER) {
                return Err(DeviceError::windows("SetupDiGetDevicePropertyW", e));
            }
        }

        let mut buffer = vec![0u8; required as usize + 2];

        // SAFETY: the buffer is at least the size the probe asked for.
        unsafe {
            SetupDiGetDevicePropertyW(
                self.handle,
                device,
                &DEVPKEY_Device_DriverDesc,
                &raw mut property_type,
                Some(&mut buffer),
                None,
                0,
            )
        }
        .map_err(|e| DeviceError::windows("SetupDiGetDevicePropertyW", e))?;

        Ok(first_wide_string(&wide_bytes_to_units(&buffer)))
    }

    fn instance_id(&self, device: &SP_DEVINFO_DATA) -> Result<String, DeviceError> {
        let mut required = 0u32;

        // SAFETY: size probe; the expected failure is ERROR_INSUFFICIENT_BUFFER.
        let _ = unsafe {
            SetupDiGetDeviceInstanceIdW(self.handle, device, None, Some(&raw mut required))
        };

        let mut buffer = vec![0u16; required as usize + 1];

        // SAFETY: the buffer is at least the size the probe asked for.
        unsafe { SetupDiGetDeviceInstanceIdW(self.handle, device, Some(&mut buffer), None) }
            .map_err(|e| DeviceError::windows("SetupDiGetDeviceInstanceIdW", e))?;

        Ok(first_wide_string(&buffer))
    }

    fn remove(&self, device: &SP_DEVINFO_DATA) -> Result<(), DeviceError> {
        let mut data = *device;

        // SAFETY: `data` is a copy of an element of this device information set.
        unsafe { SetupDiRemoveDevice(self.handle, &raw mut data) }
            .map_err(|e| DeviceError::windows("SetupDiRemoveDevice", e))
    }
}

/// Registry key handle closed on drop.
struct RegKey(HKEY);

impl Drop for RegKey {
    fn drop(&mut self) {
        // SAFETY: the key was opened by SetupDiOpenDevRegKey and is closed exactly once.
        let _ = unsafe { RegCloseKey(self.0) };
    }
}

/// Windows implementation of [`AliasLookup`] using IP Helper.
///
/// Maps an adapter's `NetCfgInstanceId` to its interface LUID and then to
/// the interface alias shown in the network connections folder.
#[derive(Debug, Clone, Default)]
pub struct IpHelperAliases {
    _private: (),
}

impl IpHelperAliases {
    /// Creates a new alias lookup.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl AliasLookup for IpHelperAliases {
    fn connection_alias(&self, id: &StableId) -> Result<String, DeviceError> {
        let guid = GUID::from_u128(id.as_uuid().as_u128());
        let mut luid = NET_LUID_LH::default();

        // SAFETY: both pointers reference live locals.
        unsafe { ConvertInterfaceGuidToLuid(&raw const guid, &raw mut luid) }
            .ok()
            .map_err(|e| DeviceError::windows("ConvertInterfaceGuidToLuid", e))?;

        let mut alias = [0u16; IF_MAX_STRING_SIZE + 1];

        // SAFETY: `luid` was filled in above; the alias buffer length is passed via the slice.
        unsafe { ConvertInterfaceLuidToAlias(&raw const luid, &mut alias) }
            .ok()
            .map_err(|e| DeviceError::windows("ConvertInterfaceLuidToAlias", e))?;

        Ok(first_wide_string(&alias))
    }
}

fn is_win32(error: &windows::core::Error, code: WIN32_ERROR) -> bool {
    error.code() == code.to_hresult()
}
