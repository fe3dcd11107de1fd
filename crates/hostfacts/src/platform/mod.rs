//! The operating system queries the decoders are built on.
//!
//! A [`Platform`] answers scalar lookups, enumerates devices and processes,
//! and hands out [`RawDeviceHandle`]s whose backend payload is released
//! exactly once when the handle is dropped.

use core::fmt;
use std::collections::BTreeMap;
use std::time::SystemTime;

use crate::Result;

#[cfg(any(target_os = "linux", target_os = "macos"))]
mod unix;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod unsupported;

#[cfg(any(test, feature = "fake"))]
pub mod fake;

#[cfg(target_os = "linux")]
pub use self::linux::LinuxPlatform as NativePlatform;

#[cfg(target_os = "macos")]
pub use self::macos::MacosPlatform as NativePlatform;

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub use self::unsupported::UnsupportedPlatform as NativePlatform;

/// Variable-length named properties, returned as raw bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ScalarProperty {
    CpuBrand,
    OsRelease,
    /// Space separated list of disk device names.
    Disks,
    BoardModel,
    BoardVendor,
    BoardSerial,
}

/// Fixed-size numeric properties.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum FixedProperty {
    /// Physical memory in bytes.
    MemSize,
    PhysicalCpu,
    LogicalCpu,
    /// Seconds since the Unix epoch.
    BootTime,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeviceKind {
    Display,
    PowerSource,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => f.write_str("display"),
            Self::PowerSource => f.write_str("power source"),
        }
    }
}

/// Backend resources held by a [`RawDeviceHandle`].
pub trait Release {
    fn release(self);
}

/// Owned reference to one enumerated OS object.
///
/// The payload is released when the handle is dropped, so every exit path
/// of a decode attempt gives it back, including early skips.
pub struct RawDeviceHandle<T: Release> {
    kind: DeviceKind,
    id: String,
    inner: Option<T>,
}

impl<T: Release> RawDeviceHandle<T> {
    pub fn new(kind: DeviceKind, id: impl Into<String>, inner: T) -> Self {
        Self {
            kind,
            id: id.into(),
            inner: Some(inner),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The backend payload. Only `None` while the handle is being dropped.
    pub fn inner(&self) -> Option<&T> {
        self.inner.as_ref()
    }
}

impl<T: Release> Drop for RawDeviceHandle<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.take() {
            trace!("releasing {} handle {}", self.kind, self.id);
            inner.release();
        }
    }
}

impl<T: Release> fmt::Debug for RawDeviceHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawDeviceHandle")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

/// A loosely typed value out of an OS property dictionary.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Integer(i64),
    String(String),
    Bool(bool),
    Data(Vec<u8>),
}

pub type PropertyMap = BTreeMap<String, PropertyValue>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AddressFamily {
    LinkLayer,
    Inet,
    Inet6,
    Other(u16),
}

/// One entry of the host's interface address list.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkInterfaceRecord {
    pub name: String,
    pub family: AddressFamily,
    /// Link-layer address bytes, if the entry carries one.
    pub hardware_address: Option<Vec<u8>>,
}

/// The OS query capabilities the decoders depend on.
pub trait Platform {
    type Display: Release;
    type PowerSource: Release;

    /// Look up a variable-length property. Any size negotiation with the OS
    /// happens inside this call.
    fn scalar(&self, property: ScalarProperty) -> Result<Vec<u8>>;

    fn fixed(&self, property: FixedProperty) -> Result<u64>;

    fn displays(&self) -> Result<Vec<RawDeviceHandle<Self::Display>>>;

    fn display_property(
        &self,
        display: &RawDeviceHandle<Self::Display>,
        key: &str,
    ) -> Result<PropertyValue>;

    fn power_sources(&self) -> Result<Vec<RawDeviceHandle<Self::PowerSource>>>;

    fn power_source_record(
        &self,
        source: &RawDeviceHandle<Self::PowerSource>,
    ) -> Result<PropertyMap>;

    /// An estimate of how many process identifiers exist right now.
    fn process_id_capacity(&self) -> Result<usize>;

    /// Write live process identifiers into `buffer`, returning how many were
    /// written. The process set may have changed since the capacity estimate.
    fn fill_process_ids(&self, buffer: &mut [i32]) -> Result<usize>;

    fn process_path(&self, pid: i32) -> Result<String>;

    fn network_interfaces(&self) -> Result<Vec<NetworkInterfaceRecord>>;

    fn graphics_adapters(&self) -> Result<Vec<String>>;

    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
