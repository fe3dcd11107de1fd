//! An in-memory [`Platform`] for tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::*;
use crate::{Error, Result};

/// Payload of a fake handle. Counts its own release.
#[derive(Debug)]
pub struct FakeDevice {
    index: usize,
    released: Rc<Cell<usize>>,
}

impl Release for FakeDevice {
    fn release(self) {
        self.released.set(self.released.get() + 1);
    }
}

/// Canned answers for every query, set up with the `with_*` builders.
///
/// Enumerations default to empty lists, scalar lookups to absent.
#[derive(Clone, Debug)]
pub struct FakePlatform {
    scalars: BTreeMap<ScalarProperty, Vec<u8>>,
    fixed: BTreeMap<FixedProperty, u64>,
    displays: Vec<Option<PropertyValue>>,
    power_sources: Vec<Option<PropertyMap>>,
    pid_capacity: usize,
    pids: Vec<i32>,
    paths: BTreeMap<i32, String>,
    interfaces: Vec<NetworkInterfaceRecord>,
    adapters: Option<Vec<String>>,
    now: SystemTime,
    acquired: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            scalars: BTreeMap::new(),
            fixed: BTreeMap::new(),
            displays: Vec::new(),
            power_sources: Vec::new(),
            pid_capacity: 0,
            pids: Vec::new(),
            paths: BTreeMap::new(),
            interfaces: Vec::new(),
            adapters: None,
            now: UNIX_EPOCH,
            acquired: Rc::new(Cell::new(0)),
            released: Rc::new(Cell::new(0)),
        }
    }
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scalar(mut self, property: ScalarProperty, value: impl Into<Vec<u8>>) -> Self {
        self.scalars.insert(property, value.into());
        self
    }

    pub fn with_fixed(mut self, property: FixedProperty, value: u64) -> Self {
        self.fixed.insert(property, value);
        self
    }

    /// Add a display whose EDID property holds `edid`.
    pub fn with_display(mut self, edid: PropertyValue) -> Self {
        self.displays.push(Some(edid));
        self
    }

    /// Add a display that has no EDID property.
    pub fn with_display_without_edid(mut self) -> Self {
        self.displays.push(None);
        self
    }

    pub fn with_power_source(mut self, record: PropertyMap) -> Self {
        self.power_sources.push(Some(record));
        self
    }

    /// Add a power source whose descriptor cannot be read.
    pub fn with_unreadable_power_source(mut self) -> Self {
        self.power_sources.push(None);
        self
    }

    /// `capacity` is what the size query answers; `pids` is what the fill
    /// query reports, even when it does not fit the caller's buffer.
    pub fn with_processes(mut self, capacity: usize, pids: Vec<i32>) -> Self {
        self.pid_capacity = capacity;
        self.pids = pids;
        self
    }

    pub fn with_process_path(mut self, pid: i32, path: impl Into<String>) -> Self {
        self.paths.insert(pid, path.into());
        self
    }

    pub fn with_interface(mut self, interface: NetworkInterfaceRecord) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_adapters(mut self, adapters: Vec<String>) -> Self {
        self.adapters = Some(adapters);
        self
    }

    pub fn with_now(mut self, seconds_since_epoch: u64) -> Self {
        self.now = UNIX_EPOCH + Duration::from_secs(seconds_since_epoch);
        self
    }

    /// Handles handed out so far.
    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }

    /// Handles released so far.
    pub fn released(&self) -> usize {
        self.released.get()
    }

    fn handles(&self, kind: DeviceKind, count: usize) -> Vec<RawDeviceHandle<FakeDevice>> {
        (0..count)
            .map(|index| {
                self.acquired.set(self.acquired.get() + 1);
                RawDeviceHandle::new(
                    kind,
                    format!("fake-{index}"),
                    FakeDevice {
                        index,
                        released: self.released.clone(),
                    },
                )
            })
            .collect()
    }

    fn index(handle: &RawDeviceHandle<FakeDevice>) -> Result<usize> {
        handle
            .inner()
            .map(|device| device.index)
            .ok_or_else(|| Error::transient("released handle"))
    }
}

impl Platform for FakePlatform {
    type Display = FakeDevice;
    type PowerSource = FakeDevice;

    fn scalar(&self, property: ScalarProperty) -> Result<Vec<u8>> {
        self.scalars
            .get(&property)
            .cloned()
            .ok_or_else(|| Error::absent(format!("{property:?}")))
    }

    fn fixed(&self, property: FixedProperty) -> Result<u64> {
        self.fixed
            .get(&property)
            .copied()
            .ok_or_else(|| Error::absent(format!("{property:?}")))
    }

    fn displays(&self) -> Result<Vec<RawDeviceHandle<FakeDevice>>> {
        Ok(self.handles(DeviceKind::Display, self.displays.len()))
    }

    fn display_property(
        &self,
        display: &RawDeviceHandle<FakeDevice>,
        key: &str,
    ) -> Result<PropertyValue> {
        self.displays
            .get(Self::index(display)?)
            .cloned()
            .flatten()
            .ok_or_else(|| Error::absent(format!("{key} on {}", display.id())))
    }

    fn power_sources(&self) -> Result<Vec<RawDeviceHandle<FakeDevice>>> {
        Ok(self.handles(DeviceKind::PowerSource, self.power_sources.len()))
    }

    fn power_source_record(&self, source: &RawDeviceHandle<FakeDevice>) -> Result<PropertyMap> {
        self.power_sources
            .get(Self::index(source)?)
            .cloned()
            .flatten()
            .ok_or_else(|| Error::transient(format!("record of {}", source.id())))
    }

    fn process_id_capacity(&self) -> Result<usize> {
        Ok(self.pid_capacity)
    }

    fn fill_process_ids(&self, buffer: &mut [i32]) -> Result<usize> {
        let copied = self.pids.len().min(buffer.len());
        buffer[..copied].copy_from_slice(&self.pids[..copied]);

        Ok(self.pids.len())
    }

    fn process_path(&self, pid: i32) -> Result<String> {
        self.paths
            .get(&pid)
            .cloned()
            .ok_or_else(|| Error::transient(format!("pid {pid}")))
    }

    fn network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>> {
        Ok(self.interfaces.clone())
    }

    fn graphics_adapters(&self) -> Result<Vec<String>> {
        self.adapters
            .clone()
            .ok_or_else(|| Error::absent("graphics adapters"))
    }

    fn now(&self) -> SystemTime {
        self.now
    }
}
