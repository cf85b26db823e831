//! Tests for adapter enumeration.

use super::*;
use crate::network::test_fixtures::{
    CapturedLogs, FakeDevice, FakeDevices, GUID_A, GUID_B, GUID_C, GUID_D, OLD_TAP_ID, TAP_ID,
    stable_id,
};

fn enumerate(devices: &FakeDevices, hardware_id: &str) -> BTreeSet<AdapterRecord> {
    enumerate_adapters(devices, devices, hardware_id).unwrap()
}

fn aliases(adapters: &BTreeSet<AdapterRecord>) -> Vec<&str> {
    adapters.iter().map(AdapterRecord::connection_alias).collect()
}

// ============================================================================
// Selectivity
// ============================================================================

mod selectivity {
    use super::*;

    #[test]
    fn returns_only_matching_hardware_id() {
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad"),
            FakeDevice::adapter(OLD_TAP_ID, GUID_B, "Mullvad-1"),
            FakeDevice::adapter("pci\\ven_8086", GUID_C, "Ethernet"),
        ]);

        let adapters = enumerate(&devices, TAP_ID);

        assert_eq!(adapters.len(), 1);
        assert_eq!(aliases(&adapters), vec!["Mullvad"]);
    }

    #[test]
    fn match_is_case_sensitive() {
        let devices = FakeDevices::new(vec![FakeDevice::adapter("TAP0901", GUID_A, "Mullvad")]);

        assert!(enumerate(&devices, OLD_TAP_ID).is_empty());
    }

    #[test]
    fn prefix_is_not_a_match() {
        let devices = FakeDevices::new(vec![FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad")]);

        // "tap0901" is not a prefix match of "tapmullvad0901" nor vice versa
        assert!(enumerate(&devices, "tapmullvad").is_empty());
    }

    #[test]
    fn devices_without_hardware_id_are_skipped() {
        let devices = FakeDevices::new(vec![
            FakeDevice::without_hardware_id(GUID_A),
            FakeDevice::adapter(TAP_ID, GUID_B, "Mullvad"),
        ]);

        assert_eq!(aliases(&enumerate(&devices, TAP_ID)), vec!["Mullvad"]);
    }

    #[test]
    fn empty_device_list_is_empty_result() {
        let devices = FakeDevices::new(vec![]);

        assert!(enumerate(&devices, TAP_ID).is_empty());
    }

    #[test]
    fn returns_every_adapter_of_the_driver() {
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(OLD_TAP_ID, GUID_A, "Mullvad"),
            FakeDevice::adapter(OLD_TAP_ID, GUID_B, "OpenVPN TAP"),
            FakeDevice::adapter(OLD_TAP_ID, GUID_C, "Ethernet 4"),
        ]);

        assert_eq!(enumerate(&devices, OLD_TAP_ID).len(), 3);
    }
}

// ============================================================================
// Record construction
// ============================================================================

mod records {
    use super::*;

    #[test]
    fn populates_all_fields() {
        let device = FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad")
            .with_description("TAP-Windows Adapter V9 for Mullvad");
        let instance_id = device.instance_id.clone();
        let devices = FakeDevices::new(vec![device]);

        let adapters = enumerate(&devices, TAP_ID);
        let adapter = adapters.first().unwrap();

        assert_eq!(adapter.stable_id(), &stable_id(GUID_A));
        assert_eq!(
            adapter.driver_description(),
            "TAP-Windows Adapter V9 for Mullvad"
        );
        assert_eq!(adapter.connection_alias(), "Mullvad");
        assert_eq!(adapter.device_instance_id(), instance_id);
    }

    #[test]
    fn duplicate_stable_ids_yield_one_record() {
        let mut duplicate = FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad");
        duplicate.instance_id = "ROOT\\NET\\9999".to_string();
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad"),
            duplicate,
        ]);

        let adapters = enumerate(&devices, TAP_ID);

        assert_eq!(adapters.len(), 1);
        assert_ne!(
            adapters.first().unwrap().device_instance_id(),
            "ROOT\\NET\\9999"
        );
    }
}

// ============================================================================
// Per-adapter failure tolerance
// ============================================================================

mod partial_failures {
    use super::*;

    fn healthy() -> FakeDevice {
        FakeDevice::adapter(TAP_ID, GUID_D, "Mullvad")
    }

    fn assert_only_healthy_survives(broken: FakeDevice) {
        let devices = FakeDevices::new(vec![broken, healthy()]);

        let adapters = enumerate(&devices, TAP_ID);

        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters.first().unwrap().stable_id(), &stable_id(GUID_D));
    }

    #[test]
    fn missing_stable_id_skips_adapter() {
        assert_only_healthy_survives(
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1").with_net_cfg_instance_id(None),
        );
    }

    #[test]
    fn malformed_stable_id_skips_adapter() {
        assert_only_healthy_survives(
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1")
                .with_net_cfg_instance_id(Some("{1234}")),
        );
    }

    #[test]
    fn unreadable_description_skips_adapter() {
        assert_only_healthy_survives(
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1").without_description(),
        );
    }

    #[test]
    fn unreadable_alias_skips_adapter() {
        assert_only_healthy_survives(FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1").without_alias());
    }

    #[test]
    fn unreadable_hardware_id_skips_device() {
        assert_only_healthy_survives(
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1").with_unreadable_hardware_id(),
        );
    }

    #[test]
    fn skipped_adapter_is_logged() {
        let logs = CapturedLogs::default();
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad-1").without_description(),
            healthy(),
        ]);

        let adapters = logs.capture(|| enumerate(&devices, TAP_ID));

        assert_eq!(adapters.len(), 1);
        let output = logs.contents();
        assert!(output.contains("Skipping adapter"), "logs: {output}");
        assert!(output.contains("SetupDiGetDevicePropertyW"), "logs: {output}");
    }

    #[test]
    fn all_adapters_broken_yields_empty_set() {
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad").without_alias(),
            FakeDevice::adapter(TAP_ID, GUID_B, "Mullvad-1").without_description(),
        ]);

        assert!(enumerate(&devices, TAP_ID).is_empty());
    }
}

// ============================================================================
// Device list lifecycle
// ============================================================================

mod lifecycle {
    use super::*;

    #[test]
    fn open_failure_aborts_enumeration() {
        let devices = FakeDevices::new(vec![FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad")])
            .failing_open();

        let result = enumerate_adapters(&devices, &devices, TAP_ID);

        assert!(result.unwrap_err().to_string().contains("SetupDiGetClassDevs"));
    }

    #[test]
    fn every_call_opens_and_releases_a_fresh_list() {
        let devices = FakeDevices::new(vec![FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad")]);

        enumerate(&devices, TAP_ID);
        enumerate(&devices, OLD_TAP_ID);

        assert_eq!(devices.opened(), 2);
        assert_eq!(devices.released(), 2);
    }

    #[test]
    fn list_is_released_when_scan_is_abandoned_early() {
        let devices = FakeDevices::new(vec![
            FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad"),
            FakeDevice::adapter(TAP_ID, GUID_B, "Mullvad-1"),
        ]);

        let first = AdapterScan::open(&devices, &devices, TAP_ID)
            .unwrap()
            .next();

        assert!(first.is_some());
        assert_eq!(devices.released(), 1);
    }

    #[test]
    fn scan_reflects_devices_added_between_calls() {
        let devices = FakeDevices::new(vec![FakeDevice::adapter(TAP_ID, GUID_A, "Mullvad")]);
        assert_eq!(enumerate(&devices, TAP_ID).len(), 1);

        devices.add(FakeDevice::adapter(TAP_ID, GUID_B, "Mullvad-1"));

        assert_eq!(enumerate(&devices, TAP_ID).len(), 2);
    }
}
