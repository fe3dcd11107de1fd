use std::io;
use std::path::Path;

use super::util::*;
use crate::{Error, ErrorKind, Result};

/// Total physical memory in bytes, from the `MemTotal` line of `meminfo`.
pub(crate) fn mem_total(meminfo: &Path) -> Result<u64> {
    let kilobytes = find_field(meminfo, "MemTotal:")?;
    Ok(kilobytes * 1024)
}

/// Boot time in seconds since the epoch, from the `btime` line of `stat`.
pub(crate) fn boot_time(stat: &Path) -> Result<u64> {
    find_field(stat, "btime")
}

/// The number after `key` on the first line that starts with it.
fn find_field(path: &Path, key: &str) -> Result<u64> {
    find_line(path, |line| {
        let mut parts = line.split_ascii_whitespace();
        if parts.next() != Some(key) {
            return None;
        }

        let value = parts.next()?;
        Some(value.parse::<u64>().map_err(|e| Error::unparseable(e, path)))
    })
}

/// Every numeric entry of the proc filesystem is a live process.
pub(crate) fn pids(proc_dir: &Path) -> Vec<i32> {
    list_dir(proc_dir)
        .iter()
        .filter_map(|name| name.parse().ok())
        .collect()
}

/// Resolve the executable behind `pid`.
///
/// Kernel threads have no executable and processes may exit or be owned by
/// another user, all of which surface as [`ErrorKind::ResourceTransient`].
pub(crate) fn exe(proc_dir: &Path, pid: i32) -> Result<String> {
    let path = proc_dir.join(format!("{pid}/exe"));

    match std::fs::read_link(&path) {
        Ok(target) => Ok(target.to_string_lossy().into_owned()),
        Err(e) if is_transient(&e) => Err(Error::with_path(ErrorKind::ResourceTransient, e, path)),
        Err(e) => Err(Error::unreadable(e, path)),
    }
}

fn is_transient(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn meminfo_total() {
        let dir = tempfile::tempdir().unwrap();
        let meminfo = dir.path().join("meminfo");
        fs::write(
            &meminfo,
            "MemTotal:       16318412 kB\nMemFree:         1234567 kB\n",
        )
        .unwrap();

        assert_eq!(mem_total(&meminfo).unwrap(), 16318412 * 1024);
    }

    #[test]
    fn stat_btime() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");
        fs::write(
            &stat,
            "cpu  10132153 290696 3084719 46828483 16683 0 25195 0 0 0\nctxt 1990473\nbtime 1700000000\nprocesses 2915\n",
        )
        .unwrap();

        assert_eq!(boot_time(&stat).unwrap(), 1_700_000_000);
    }

    #[test]
    fn stat_without_btime() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");
        fs::write(&stat, "ctxt 1990473\n").unwrap();

        assert_eq!(
            boot_time(&stat).unwrap_err().kind(),
            ErrorKind::PropertyAbsent
        );
    }

    #[test]
    fn numeric_entries_are_processes() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["1", "42", "self", "sys", "777"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }

        let mut pids = pids(dir.path());
        pids.sort();
        assert_eq!(pids, vec![1, 42, 777]);
    }

    #[test]
    fn vanished_process_is_transient() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            exe(dir.path(), 4242).unwrap_err().kind(),
            ErrorKind::ResourceTransient
        );
    }

    #[test]
    fn exe_link_is_resolved() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("42")).unwrap();
        std::os::unix::fs::symlink("/usr/bin/sleep", dir.path().join("42/exe")).unwrap();

        assert_eq!(exe(dir.path(), 42).unwrap(), "/usr/bin/sleep");
    }
}
