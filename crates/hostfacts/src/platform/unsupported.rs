use super::*;
use crate::{Error, Result};

/// Placeholder payload; no handles are ever produced.
#[derive(Debug)]
pub struct NoDevice;

impl Release for NoDevice {
    fn release(self) {}
}

/// [`Platform`] for targets without a backend. Every query reports the
/// property as absent, which the report renders as missing data.
#[derive(Copy, Clone, Debug, Default)]
pub struct UnsupportedPlatform;

fn unsupported<T>(what: &str) -> Result<T> {
    Err(Error::absent(format!("{what} on {}", std::env::consts::OS)))
}

impl Platform for UnsupportedPlatform {
    type Display = NoDevice;
    type PowerSource = NoDevice;

    fn scalar(&self, property: ScalarProperty) -> Result<Vec<u8>> {
        unsupported(&format!("{property:?}"))
    }

    fn fixed(&self, property: FixedProperty) -> Result<u64> {
        unsupported(&format!("{property:?}"))
    }

    fn displays(&self) -> Result<Vec<RawDeviceHandle<NoDevice>>> {
        unsupported("displays")
    }

    fn display_property(&self, _: &RawDeviceHandle<NoDevice>, key: &str) -> Result<PropertyValue> {
        unsupported(key)
    }

    fn power_sources(&self) -> Result<Vec<RawDeviceHandle<NoDevice>>> {
        unsupported("power sources")
    }

    fn power_source_record(&self, _: &RawDeviceHandle<NoDevice>) -> Result<PropertyMap> {
        unsupported("power source record")
    }

    fn process_id_capacity(&self) -> Result<usize> {
        unsupported("process list")
    }

    fn fill_process_ids(&self, _: &mut [i32]) -> Result<usize> {
        unsupported("process list")
    }

    fn process_path(&self, pid: i32) -> Result<String> {
        unsupported(&format!("path of pid {pid}"))
    }

    fn network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        unsupported("network interfaces")
    }

    fn graphics_adapters(&self) -> Result<Vec<String>> {
        unsupported("graphics adapters")
    }
}
