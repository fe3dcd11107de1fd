use std::io;
use std::mem;
use std::ptr;

use crate::{Error, Result};

const PID_SIZE: usize = mem::size_of::<libc::pid_t>();

pub(crate) fn pid_capacity() -> Result<usize> {
    let bytes = unsafe { libc::proc_listpids(libc::PROC_ALL_PIDS, 0, ptr::null_mut(), 0) };

    if bytes < 0 {
        return Err(Error::io(io::Error::last_os_error()));
    }

    Ok(bytes as usize / PID_SIZE)
}

pub(crate) fn fill(buffer: &mut [i32]) -> Result<usize> {
    let size = libc::c_int::try_from(buffer.len() * PID_SIZE)
        .map_err(|_| Error::malformed(format!("pid buffer of {} entries", buffer.len())))?;

    let bytes =
        unsafe { libc::proc_listpids(libc::PROC_ALL_PIDS, 0, buffer.as_mut_ptr().cast(), size) };

    if bytes < 0 {
        return Err(Error::io(io::Error::last_os_error()));
    }

    Ok((bytes as usize / PID_SIZE).min(buffer.len()))
}

pub(crate) fn path(pid: i32) -> Result<String> {
    let mut buffer = vec![0_u8; libc::PROC_PIDPATHINFO_MAXSIZE as usize];

    let len = unsafe { libc::proc_pidpath(pid, buffer.as_mut_ptr().cast(), buffer.len() as u32) };

    if len <= 0 {
        // the process exited or belongs to someone we may not inspect
        return Err(Error::transient(format!(
            "pid {pid}: {}",
            io::Error::last_os_error()
        )));
    }

    buffer.truncate(len as usize);
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
