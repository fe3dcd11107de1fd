//! Single-value facts that need no decoding beyond bytes to text.

use core::fmt;

use crate::platform::{FixedProperty, Platform, ScalarProperty};

const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Text of a property value, without the NUL terminator C strings carry.
pub(crate) fn bytes_to_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim().to_owned()
}

/// Look up a text property. Absent and blank values are both `None`.
pub fn text<P: Platform>(platform: &P, property: ScalarProperty) -> Option<String> {
    match platform.scalar(property) {
        Ok(bytes) => Some(bytes_to_string(&bytes)).filter(|text| !text.is_empty()),
        Err(e) => {
            debug!("{property:?}: {e}");
            None
        }
    }
}

pub fn number<P: Platform>(platform: &P, property: FixedProperty) -> Option<u64> {
    platform
        .fixed(property)
        .map_err(|e| debug!("{property:?}: {e}"))
        .ok()
}

pub fn total_memory_mb<P: Platform>(platform: &P) -> Option<u64> {
    number(platform, FixedProperty::MemSize).map(|bytes| bytes / BYTES_PER_MEGABYTE)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardInfo {
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub serial: Option<String>,
}

impl BoardInfo {
    pub fn new<P: Platform>(platform: &P) -> Self {
        Self {
            model: text(platform, ScalarProperty::BoardModel),
            vendor: text(platform, ScalarProperty::BoardVendor),
            serial: text(platform, ScalarProperty::BoardSerial),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CoreCount {
    pub physical: Option<u64>,
    pub logical: Option<u64>,
}

impl CoreCount {
    pub fn new<P: Platform>(platform: &P) -> Self {
        Self {
            physical: number(platform, FixedProperty::PhysicalCpu),
            logical: number(platform, FixedProperty::LogicalCpu),
        }
    }
}

impl fmt::Display for CoreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Physical Cores: ")?;
        match self.physical {
            Some(count) => write!(f, "{count}")?,
            None => f.write_str("Not available")?,
        }
        f.write_str(", Logical Cores: ")?;
        match self.logical {
            Some(count) => write!(f, "{count}"),
            None => f.write_str("Not available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakePlatform;

    #[test]
    fn nul_terminated_text() {
        assert_eq!(bytes_to_string(b"23.4.0\0"), "23.4.0");
        assert_eq!(bytes_to_string(b"Apple M2 Pro\0\0\0garbage"), "Apple M2 Pro");
        assert_eq!(bytes_to_string(b""), "");
    }

    #[test]
    fn memory_in_megabytes() {
        let platform = FakePlatform::new().with_fixed(FixedProperty::MemSize, 17_179_869_184);
        assert_eq!(total_memory_mb(&platform), Some(16_384));
        assert_eq!(total_memory_mb(&FakePlatform::new()), None);
    }

    #[test]
    fn blank_text_is_absent() {
        let platform = FakePlatform::new()
            .with_scalar(ScalarProperty::BoardSerial, "\0")
            .with_scalar(ScalarProperty::BoardModel, "Mac14,10\0");

        let board = BoardInfo::new(&platform);
        assert_eq!(board.model.as_deref(), Some("Mac14,10"));
        assert_eq!(board.serial, None);
        assert_eq!(board.vendor, None);
    }

    #[test]
    fn core_count() {
        let platform = FakePlatform::new()
            .with_fixed(FixedProperty::PhysicalCpu, 8)
            .with_fixed(FixedProperty::LogicalCpu, 16);
        assert_eq!(
            CoreCount::new(&platform).to_string(),
            "Physical Cores: 8, Logical Cores: 16"
        );

        assert_eq!(
            CoreCount::default().to_string(),
            "Physical Cores: Not available, Logical Cores: Not available"
        );
    }
}
