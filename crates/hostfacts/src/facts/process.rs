//! Inventory of running processes.

use crate::platform::Platform;
use crate::ErrorKind;

/// Extra slots on top of the size estimate, for processes started between
/// the size query and the fill.
const PID_HEADROOM: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: i32,
    pub executable_path: String,
}

/// Walk every live process and resolve its executable.
///
/// Only the identifiers the fill call reports, capped at the buffer length,
/// are read. Processes that exit or cannot be inspected mid-walk are
/// skipped. Records keep the order in which the OS listed them.
pub fn running_processes<P: Platform>(platform: &P) -> Vec<ProcessRecord> {
    let capacity = match platform.process_id_capacity() {
        Ok(capacity) => capacity,
        Err(e) => {
            debug!("unable to size the process list: {e}");
            return Vec::new();
        }
    };

    let mut pids = vec![0; capacity + PID_HEADROOM];

    let filled = match platform.fill_process_ids(&mut pids) {
        Ok(filled) => filled,
        Err(e) => {
            debug!("unable to list processes: {e}");
            return Vec::new();
        }
    };

    if filled > pids.len() {
        debug!(
            "process list grew to {filled} entries, reading the first {}",
            pids.len()
        );
    }
    pids.truncate(filled);

    let mut ret = Vec::with_capacity(pids.len());

    for pid in pids.into_iter().filter(|pid| *pid > 0) {
        match platform.process_path(pid) {
            Ok(executable_path) => ret.push(ProcessRecord {
                pid,
                executable_path,
            }),
            Err(e) if e.kind() == ErrorKind::ResourceTransient => {
                trace!("skipping pid {pid}: {e}");
            }
            Err(e) => debug!("skipping pid {pid}: {e}"),
        }
    }

    ret
}
