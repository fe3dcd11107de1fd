//! Display geometry decoded from EDID.
//!
//! Offsets follow the VESA E-EDID base block: an 8 byte header, then the
//! first 18 byte detailed timing descriptor at byte 54, which EDID 1.3 and
//! later require to be the preferred mode.

use core::fmt;

use crate::platform::{Platform, PropertyValue, RawDeviceHandle};
use crate::{Error, Result};

/// Display property holding the raw EDID bytes.
pub const EDID_KEY: &str = "EDID";

/// Length of the EDID base block, the shortest buffer that can decode.
pub const EDID_BLOCK_LEN: usize = 128;

const EDID_HEADER: [u8; 8] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

const PREFERRED_TIMING: usize = 54;
const DESCRIPTOR_LEN: usize = 18;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Resolution {
    pub width: u16,
    pub height: u16,
}

impl Resolution {
    /// Decode the preferred mode out of an EDID buffer. Extension blocks
    /// past the base block are ignored.
    pub fn from_edid(edid: &[u8]) -> Result<Self> {
        let Some(block) = edid.get(..EDID_BLOCK_LEN) else {
            return Err(Error::malformed(format!(
                "EDID of {} bytes, need {EDID_BLOCK_LEN}",
                edid.len()
            )));
        };

        if block[..EDID_HEADER.len()] != EDID_HEADER {
            return Err(Error::malformed("EDID header mismatch"));
        }

        let checksum = block.iter().fold(0_u8, |sum, b| sum.wrapping_add(*b));
        if checksum != 0 {
            // plenty of panels ship a bad checksum with otherwise sane timings
            debug!("EDID checksum is off by {checksum:#04x}");
        }

        let timing = &block[PREFERRED_TIMING..PREFERRED_TIMING + DESCRIPTOR_LEN];

        // a zero pixel clock marks a display descriptor, not a timing
        if timing[0] == 0 && timing[1] == 0 {
            return Err(Error::malformed("EDID has no detailed timing descriptor"));
        }

        // 12 bit fields: low byte, then the upper nibble of a shared byte
        let width = u16::from(timing[2]) | (u16::from(timing[4] & 0xF0) << 4);
        let height = u16::from(timing[5]) | (u16::from(timing[7] & 0xF0) << 4);

        Ok(Self { width, height })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resolve every attached display. Displays that cannot be decoded are
/// skipped and never stop the others from decoding.
pub fn resolutions<P: Platform>(platform: &P) -> Vec<Resolution> {
    let displays = match platform.displays() {
        Ok(displays) => displays,
        Err(e) => {
            debug!("unable to enumerate displays: {e}");
            return Vec::new();
        }
    };

    let mut ret = Vec::with_capacity(displays.len());

    for display in displays {
        match decode(platform, &display) {
            Ok(resolution) => ret.push(resolution),
            Err(e) => debug!("skipping display {}: {e}", display.id()),
        }
    }

    ret
}

fn decode<P: Platform>(platform: &P, display: &RawDeviceHandle<P::Display>) -> Result<Resolution> {
    match platform.display_property(display, EDID_KEY)? {
        PropertyValue::Data(edid) => Resolution::from_edid(&edid),
        other => Err(Error::malformed(format!(
            "EDID is not byte data: {other:?}"
        ))),
    }
}
