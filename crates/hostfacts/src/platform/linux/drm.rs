use std::path::{Path, PathBuf};

use super::util::*;

/// Connector directories (`card0-HDMI-A-1`) that expose an `edid` file.
pub(crate) fn connectors(drm_dir: &Path) -> Vec<PathBuf> {
    list_dir(drm_dir)
        .into_iter()
        .filter(|name| name.starts_with("card") && name.contains('-'))
        .map(|name| drm_dir.join(name))
        .filter(|path| path.join("edid").exists())
        .collect()
}

/// One line per graphics card (`card0`, `card1`, ...), built from the
/// `DRIVER` and `PCI_ID` entries of the device's uevent file.
pub(crate) fn adapters(drm_dir: &Path) -> Vec<String> {
    let mut ret = Vec::new();

    for name in list_dir(drm_dir) {
        let Some(index) = name.strip_prefix("card") else {
            continue;
        };
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }

        let Ok(uevent) = read_string(drm_dir.join(&name).join("device/uevent")) else {
            debug!("{name} has no device uevent");
            continue;
        };

        let mut driver = None;
        let mut pci_id = None;

        for line in uevent.lines() {
            if let Some(value) = line.strip_prefix("DRIVER=") {
                driver = Some(value.to_owned());
            } else if let Some(value) = line.strip_prefix("PCI_ID=") {
                pci_id = Some(value.to_owned());
            }
        }

        let line = match (driver, pci_id) {
            (Some(driver), Some(pci_id)) => format!("{driver} ({pci_id})"),
            (Some(driver), None) => driver,
            (None, Some(pci_id)) => pci_id,
            (None, None) => name,
        };

        ret.push(line);
    }

    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn connectors_need_edid() {
        let dir = tempfile::tempdir().unwrap();
        let drm = dir.path();
        fs::create_dir_all(drm.join("card0-HDMI-A-1")).unwrap();
        fs::write(drm.join("card0-HDMI-A-1/edid"), b"").unwrap();
        fs::create_dir_all(drm.join("card0-Writeback-1")).unwrap();
        fs::create_dir_all(drm.join("card0")).unwrap();
        fs::create_dir_all(drm.join("renderD128")).unwrap();

        assert_eq!(connectors(drm), vec![drm.join("card0-HDMI-A-1")]);
    }

    #[test]
    fn adapters_from_uevent() {
        let dir = tempfile::tempdir().unwrap();
        let drm = dir.path();
        fs::create_dir_all(drm.join("card0/device")).unwrap();
        fs::write(
            drm.join("card0/device/uevent"),
            "DRIVER=amdgpu\nPCI_CLASS=30000\nPCI_ID=1002:73BF\n",
        )
        .unwrap();
        fs::create_dir_all(drm.join("card0-DP-1")).unwrap();
        fs::create_dir_all(drm.join("card1")).unwrap();

        assert_eq!(adapters(drm), vec!["amdgpu (1002:73BF)".to_string()]);
    }
}
