//! Facts read through sysctl, libproc and the I/O registry.

use plist::Dictionary;

use super::*;
use crate::facts::display::EDID_KEY;
use crate::facts::power::{CURRENT_CAPACITY_KEY, IS_CHARGING_KEY, MAX_CAPACITY_KEY};
use crate::{Error, Result};

mod libproc;
mod registry;
mod sysctl;

const DISPLAY_CLASS: &str = "IODisplayConnect";
const BATTERY_CLASS: &str = "AppleSmartBattery";

/// Registry properties in the order they are copied into a power source
/// record, with the record key each one is stored under.
const BATTERY_KEYS: [(&str, &str); 3] = [
    ("CurrentCapacity", CURRENT_CAPACITY_KEY),
    ("MaxCapacity", MAX_CAPACITY_KEY),
    ("IsCharging", IS_CHARGING_KEY),
];

/// A snapshot of one I/O registry entry. The registry object itself was
/// released by `ioreg` before the snapshot was parsed.
#[derive(Debug)]
pub struct RegistryEntry {
    properties: Dictionary,
}

impl Release for RegistryEntry {
    fn release(self) {}
}

#[derive(Copy, Clone, Debug, Default)]
pub struct MacosPlatform;

impl MacosPlatform {
    fn handles(kind: DeviceKind, class: &str) -> Result<Vec<RawDeviceHandle<RegistryEntry>>> {
        Ok(registry::entries(class)?
            .into_iter()
            .enumerate()
            .map(|(index, properties)| {
                RawDeviceHandle::new(
                    kind,
                    format!("{class}[{index}]"),
                    RegistryEntry { properties },
                )
            })
            .collect())
    }

    fn properties<'a>(handle: &'a RawDeviceHandle<RegistryEntry>) -> Result<&'a Dictionary> {
        handle
            .inner()
            .map(|entry| &entry.properties)
            .ok_or_else(|| Error::transient(format!("released {} handle", handle.kind())))
    }
}

impl Platform for MacosPlatform {
    type Display = RegistryEntry;
    type PowerSource = RegistryEntry;

    fn scalar(&self, property: ScalarProperty) -> Result<Vec<u8>> {
        match property {
            ScalarProperty::CpuBrand => sysctl::bytes("machdep.cpu.brand_string"),
            ScalarProperty::OsRelease => sysctl::bytes("kern.osrelease"),
            ScalarProperty::Disks => sysctl::bytes("kern.disks"),
            ScalarProperty::BoardModel => sysctl::bytes("hw.model"),
            // macs are only ever built on Apple boards
            ScalarProperty::BoardVendor => Ok(b"Apple".to_vec()),
            ScalarProperty::BoardSerial => sysctl::bytes("hw.serialno"),
        }
    }

    fn fixed(&self, property: FixedProperty) -> Result<u64> {
        unsafe {
            match property {
                FixedProperty::MemSize => sysctl::value::<u64>("hw.memsize"),
                FixedProperty::PhysicalCpu => {
                    sysctl::value::<libc::c_int>("hw.physicalcpu").map(|v| v.max(0) as u64)
                }
                FixedProperty::LogicalCpu => {
                    sysctl::value::<libc::c_int>("hw.logicalcpu").map(|v| v.max(0) as u64)
                }
                FixedProperty::BootTime => sysctl::value::<libc::timeval>("kern.boottime")
                    .map(|boot| boot.tv_sec.max(0) as u64),
            }
        }
    }

    fn displays(&self) -> Result<Vec<RawDeviceHandle<RegistryEntry>>> {
        Self::handles(DeviceKind::Display, DISPLAY_CLASS)
    }

    fn display_property(
        &self,
        display: &RawDeviceHandle<RegistryEntry>,
        key: &str,
    ) -> Result<PropertyValue> {
        let registry_key = if key == EDID_KEY { "IODisplayEDID" } else { key };
        let properties = Self::properties(display)?;

        let value = registry::find(properties, registry_key)
            .ok_or_else(|| Error::absent(format!("{registry_key} on {}", display.id())))?;

        registry::property_value(value)
            .ok_or_else(|| Error::malformed(format!("{registry_key} on {}", display.id())))
    }

    fn power_sources(&self) -> Result<Vec<RawDeviceHandle<RegistryEntry>>> {
        Self::handles(DeviceKind::PowerSource, BATTERY_CLASS)
    }

    fn power_source_record(&self, source: &RawDeviceHandle<RegistryEntry>) -> Result<PropertyMap> {
        let properties = Self::properties(source)?;
        let mut record = PropertyMap::new();

        for (registry_key, record_key) in BATTERY_KEYS {
            if let Some(value) = properties.get(registry_key).and_then(registry::property_value) {
                record.insert(record_key.to_owned(), value);
            }
        }

        Ok(record)
    }

    fn process_id_capacity(&self) -> Result<usize> {
        libproc::pid_capacity()
    }

    fn fill_process_ids(&self, buffer: &mut [i32]) -> Result<usize> {
        libproc::fill(buffer)
    }

    fn process_path(&self, pid: i32) -> Result<String> {
        libproc::path(pid)
    }

    fn network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        super::unix::interfaces()
    }

    fn graphics_adapters(&self) -> Result<Vec<String>> {
        registry::graphics_adapters()
    }
}
