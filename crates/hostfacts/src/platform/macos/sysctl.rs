use std::ffi::CString;
use std::io;
use std::mem;
use std::ptr;

use crate::{Error, Result};

fn name(name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| Error::malformed(format!("sysctl name {name:?}")))
}

fn last_error(name: &str) -> Error {
    let error = io::Error::last_os_error();

    if error.raw_os_error() == Some(libc::ENOENT) {
        Error::absent(format!("sysctl {name}"))
    } else {
        Error::io(error)
    }
}

/// Read a variable-length sysctl. The first call sizes the buffer, the second
/// fills it, and only the length reported by the fill is kept.
pub(crate) fn bytes(key: &str) -> Result<Vec<u8>> {
    let cname = name(key)?;
    let mut size: libc::size_t = 0;

    if unsafe {
        libc::sysctlbyname(
            cname.as_ptr(),
            ptr::null_mut(),
            &mut size,
            ptr::null_mut(),
            0,
        )
    } != 0
    {
        return Err(last_error(key));
    }

    let mut buffer = vec![0_u8; size];

    if unsafe {
        libc::sysctlbyname(
            cname.as_ptr(),
            buffer.as_mut_ptr().cast(),
            &mut size,
            ptr::null_mut(),
            0,
        )
    } != 0
    {
        return Err(last_error(key));
    }

    buffer.truncate(size);
    Ok(buffer)
}

/// Read a fixed-size sysctl into a plain-old-data value.
///
/// # Safety
///
/// `T` must be valid for any bit pattern the kernel may write.
pub(crate) unsafe fn value<T: Copy>(key: &str) -> Result<T> {
    let cname = name(key)?;
    let mut value: T = mem::zeroed();
    let mut size = mem::size_of::<T>();

    if libc::sysctlbyname(
        cname.as_ptr(),
        (&mut value as *mut T).cast(),
        &mut size,
        ptr::null_mut(),
        0,
    ) != 0
    {
        return Err(last_error(key));
    }

    if size != mem::size_of::<T>() {
        return Err(Error::malformed(format!(
            "sysctl {key} returned {size} bytes, expected {}",
            mem::size_of::<T>()
        )));
    }

    Ok(value)
}
