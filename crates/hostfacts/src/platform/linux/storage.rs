use std::path::Path;

use super::util::*;

/// Block devices under `block_dir`, skipping loop and ram devices, joined by
/// single spaces.
pub(crate) fn disk_labels(block_dir: &Path) -> String {
    list_dir(block_dir)
        .into_iter()
        .filter(|name| !name.starts_with("loop") && !name.starts_with("ram"))
        .collect::<Vec<_>>()
        .join(" ")
}
