use crate::platform::{Platform, ScalarProperty};

use super::scalar::bytes_to_string;

/// Split a space separated disk label blob into device names, in order.
/// Repeated or trailing separators never produce empty names.
pub fn split_disk_labels(blob: &[u8]) -> Vec<String> {
    bytes_to_string(blob)
        .split(' ')
        .filter(|label| !label.is_empty())
        .map(|label| label.to_owned())
        .collect()
}

pub fn disk_drives<P: Platform>(platform: &P) -> Vec<String> {
    match platform.scalar(ScalarProperty::Disks) {
        Ok(blob) => split_disk_labels(&blob),
        Err(e) => {
            debug!("no disk labels: {e}");
            Vec::new()
        }
    }
}
