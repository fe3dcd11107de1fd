use core::fmt;

use crate::platform::{AddressFamily, NetworkInterfaceRecord, Platform};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The hardware address of a link-layer record. Entries without exactly
    /// six address bytes carry no hardware address.
    fn from_record(record: &NetworkInterfaceRecord) -> Option<Self> {
        if record.family != AddressFamily::LinkLayer {
            return None;
        }

        let octets: [u8; 6] = record.hardware_address.as_deref()?.try_into().ok()?;

        Some(Self(octets))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// The hardware address of the first link-layer interface, in the order the
/// OS lists them. Hosts with several NICs get whichever comes first, which on
/// Linux is usually the all-zero address of `lo`.
pub fn mac_address<P: Platform>(platform: &P) -> Option<MacAddress> {
    let interfaces = match platform.network_interfaces() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            debug!("unable to list network interfaces: {e}");
            return None;
        }
    };

    interfaces.iter().find_map(|record| {
        let address = MacAddress::from_record(record)?;
        debug!("using hardware address of {}", record.name);
        Some(address)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakePlatform;

    fn link(name: &str, address: &[u8]) -> NetworkInterfaceRecord {
        NetworkInterfaceRecord {
            name: name.into(),
            family: AddressFamily::LinkLayer,
            hardware_address: Some(address.to_vec()),
        }
    }

    fn inet(name: &str) -> NetworkInterfaceRecord {
        NetworkInterfaceRecord {
            name: name.into(),
            family: AddressFamily::Inet,
            hardware_address: None,
        }
    }

    #[test]
    fn formatting() {
        let address = MacAddress([0, 26, 59, 128, 10, 1]);
        assert_eq!(address.to_string(), "00:1A:3B:80:0A:01");
    }

    #[test]
    fn first_link_layer_entry_wins() {
        let platform = FakePlatform::new()
            .with_interface(inet("en0"))
            .with_interface(link("en0", &[0xA4, 0x83, 0xE7, 0x12, 0x34, 0x56]))
            .with_interface(link("en1", &[0x3C, 0x22, 0xFB, 0x00, 0x00, 0x01]));

        assert_eq!(
            mac_address(&platform).unwrap().to_string(),
            "A4:83:E7:12:34:56"
        );
    }

    #[test]
    fn leading_loopback_wins() {
        let platform = FakePlatform::new()
            .with_interface(link("lo", &[0; 6]))
            .with_interface(link("eth0", &[0x52, 0x54, 0x00, 0xAB, 0xCD, 0xEF]));

        assert_eq!(
            mac_address(&platform).unwrap().to_string(),
            "00:00:00:00:00:00"
        );
    }

    #[test]
    fn entries_without_six_bytes_are_skipped() {
        let platform = FakePlatform::new()
            .with_interface(link("lo0", &[]))
            .with_interface(link("ib0", &[0x80; 20]))
            .with_interface(link("eth0", &[0x52, 0x54, 0x00, 0xAB, 0xCD, 0xEF]));

        assert_eq!(
            mac_address(&platform),
            Some(MacAddress([0x52, 0x54, 0x00, 0xAB, 0xCD, 0xEF]))
        );
    }

    #[test]
    fn no_interfaces() {
        let platform = FakePlatform::new();
        assert_eq!(mac_address(&platform), None);

        let platform = FakePlatform::new().with_interface(inet("lo"));
        assert_eq!(mac_address(&platform), None);
    }
}
