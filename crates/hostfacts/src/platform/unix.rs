use std::ffi::CStr;
use std::ptr;

use super::{AddressFamily, NetworkInterfaceRecord};
use crate::{Error, Result};

#[cfg(target_os = "linux")]
const AF_LINK_LAYER: i32 = libc::AF_PACKET;

#[cfg(target_os = "macos")]
const AF_LINK_LAYER: i32 = libc::AF_LINK;

/// Owns the list returned by `getifaddrs(3)` and frees it on drop.
struct InterfaceAddresses {
    head: *mut libc::ifaddrs,
}

impl InterfaceAddresses {
    fn new() -> Result<Self> {
        let mut head = ptr::null_mut();

        if unsafe { libc::getifaddrs(&mut head) } != 0 {
            return Err(Error::io(std::io::Error::last_os_error()));
        }

        Ok(Self { head })
    }

    fn iter(&self) -> impl Iterator<Item = &libc::ifaddrs> + '_ {
        let mut next = self.head;

        std::iter::from_fn(move || {
            // entries stay valid until `freeifaddrs` runs in drop
            let entry = unsafe { next.as_ref()? };
            next = entry.ifa_next;
            Some(entry)
        })
    }
}

impl Drop for InterfaceAddresses {
    fn drop(&mut self) {
        if !self.head.is_null() {
            unsafe { libc::freeifaddrs(self.head) };
        }
    }
}

/// Walk the interface address list once, in OS order.
pub(crate) fn interfaces() -> Result<Vec<NetworkInterfaceRecord>> {
    let addresses = InterfaceAddresses::new()?;
    let mut ret = Vec::new();

    for entry in addresses.iter() {
        if entry.ifa_addr.is_null() || entry.ifa_name.is_null() {
            continue;
        }

        let name = unsafe { CStr::from_ptr(entry.ifa_name) }
            .to_string_lossy()
            .into_owned();
        let family = unsafe { (*entry.ifa_addr).sa_family } as i32;

        let record = match family {
            AF_LINK_LAYER => NetworkInterfaceRecord {
                name,
                family: AddressFamily::LinkLayer,
                hardware_address: Some(unsafe { link_address(entry.ifa_addr) }),
            },
            libc::AF_INET => NetworkInterfaceRecord {
                name,
                family: AddressFamily::Inet,
                hardware_address: None,
            },
            libc::AF_INET6 => NetworkInterfaceRecord {
                name,
                family: AddressFamily::Inet6,
                hardware_address: None,
            },
            other => NetworkInterfaceRecord {
                name,
                family: AddressFamily::Other(other as u16),
                hardware_address: None,
            },
        };

        ret.push(record);
    }

    Ok(ret)
}

#[cfg(target_os = "linux")]
unsafe fn link_address(addr: *const libc::sockaddr) -> Vec<u8> {
    let ll = &*(addr as *const libc::sockaddr_ll);
    let len = (ll.sll_halen as usize).min(ll.sll_addr.len());

    ll.sll_addr[..len].to_vec()
}

#[cfg(target_os = "macos")]
unsafe fn link_address(addr: *const libc::sockaddr) -> Vec<u8> {
    // the address follows the interface name inside `sdl_data`, which may run
    // past the declared array length
    let dl = &*(addr as *const libc::sockaddr_dl);
    let start = (dl.sdl_data.as_ptr() as *const u8).add(dl.sdl_nlen as usize);

    std::slice::from_raw_parts(start, dl.sdl_alen as usize).to_vec()
}
