//! Facts read from sysfs and procfs.

use std::path::{Path, PathBuf};

use super::*;
use crate::facts::display::EDID_KEY;
use crate::{Error, Result};

mod cpu;
mod drm;
mod power;
mod procfs;
mod storage;
mod util;

use self::util::*;

/// A sysfs device directory. Nothing is held open between calls, so release
/// has nothing to give back.
#[derive(Debug)]
pub struct SysfsDevice {
    path: PathBuf,
}

impl Release for SysfsDevice {
    fn release(self) {}
}

/// [`Platform`] backed by `/sys` and `/proc`.
///
/// The root can be moved, which lets tests point the backend at a fake
/// directory tree.
#[derive(Clone, Debug)]
pub struct LinuxPlatform {
    root: PathBuf,
}

impl Default for LinuxPlatform {
    fn default() -> Self {
        Self::with_root("/")
    }
}

impl LinuxPlatform {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn device_path<'a>(&self, handle: &'a RawDeviceHandle<SysfsDevice>) -> Result<&'a Path> {
        handle
            .inner()
            .map(|device| device.path.as_path())
            .ok_or_else(|| Error::transient(format!("released {} handle", handle.kind())))
    }
}

impl Platform for LinuxPlatform {
    type Display = SysfsDevice;
    type PowerSource = SysfsDevice;

    fn scalar(&self, property: ScalarProperty) -> Result<Vec<u8>> {
        let value = match property {
            ScalarProperty::CpuBrand => cpu::brand(&self.path("proc/cpuinfo"))?,
            ScalarProperty::OsRelease => read_string(self.path("proc/sys/kernel/osrelease"))?,
            ScalarProperty::Disks => storage::disk_labels(&self.path("sys/block")),
            ScalarProperty::BoardModel => read_string(self.path("sys/class/dmi/id/board_name"))?,
            ScalarProperty::BoardVendor => {
                read_string(self.path("sys/class/dmi/id/board_vendor"))?
            }
            ScalarProperty::BoardSerial => {
                read_string(self.path("sys/class/dmi/id/board_serial"))?
            }
        };

        Ok(value.into_bytes())
    }

    fn fixed(&self, property: FixedProperty) -> Result<u64> {
        match property {
            FixedProperty::MemSize => procfs::mem_total(&self.path("proc/meminfo")),
            FixedProperty::PhysicalCpu => cpu::physical(&self.path("sys/devices/system/cpu")),
            FixedProperty::LogicalCpu => cpu::logical(&self.path("sys/devices/system/cpu")),
            FixedProperty::BootTime => procfs::boot_time(&self.path("proc/stat")),
        }
    }

    fn displays(&self) -> Result<Vec<RawDeviceHandle<SysfsDevice>>> {
        Ok(drm::connectors(&self.path("sys/class/drm"))
            .into_iter()
            .map(|path| {
                let id = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                RawDeviceHandle::new(DeviceKind::Display, id, SysfsDevice { path })
            })
            .collect())
    }

    fn display_property(
        &self,
        display: &RawDeviceHandle<SysfsDevice>,
        key: &str,
    ) -> Result<PropertyValue> {
        if key != EDID_KEY {
            return Err(Error::absent(format!("{key} on {}", display.id())));
        }

        let path = self.device_path(display)?;
        Ok(PropertyValue::Data(read_bytes(path.join("edid"))?))
    }

    fn power_sources(&self) -> Result<Vec<RawDeviceHandle<SysfsDevice>>> {
        Ok(power::supplies(&self.path("sys/class/power_supply"))
            .into_iter()
            .map(|path| {
                let id = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                RawDeviceHandle::new(DeviceKind::PowerSource, id, SysfsDevice { path })
            })
            .collect())
    }

    fn power_source_record(&self, source: &RawDeviceHandle<SysfsDevice>) -> Result<PropertyMap> {
        power::record(self.device_path(source)?)
    }

    fn process_id_capacity(&self) -> Result<usize> {
        Ok(procfs::pids(&self.path("proc")).len())
    }

    fn fill_process_ids(&self, buffer: &mut [i32]) -> Result<usize> {
        let pids = procfs::pids(&self.path("proc"));
        let filled = pids.len().min(buffer.len());

        buffer[..filled].copy_from_slice(&pids[..filled]);

        Ok(filled)
    }

    fn process_path(&self, pid: i32) -> Result<String> {
        procfs::exe(&self.path("proc"), pid)
    }

    fn network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        super::unix::interfaces()
    }

    fn graphics_adapters(&self) -> Result<Vec<String>> {
        Ok(drm::adapters(&self.path("sys/class/drm")))
    }
}
