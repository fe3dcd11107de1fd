use std::collections::BTreeSet;
use std::path::Path;

use super::util::*;
use crate::Result;

/// The `model name` (or `Model` on some arm boards) of the first processor
/// listed in `cpuinfo`.
pub(crate) fn brand(cpuinfo: &Path) -> Result<String> {
    find_line(cpuinfo, |line| {
        let (key, value) = line.split_once(':')?;
        let value = value.trim();

        match key.trim() {
            "model name" | "Model" if !value.is_empty() => Some(Ok(value.to_owned())),
            _ => None,
        }
    })
}

/// Number of online logical cpus.
pub(crate) fn logical(cpu_dir: &Path) -> Result<u64> {
    let ids = read_list(cpu_dir.join("online"))?;
    Ok(ids.len() as u64)
}

/// Number of distinct physical cores among the online cpus.
pub(crate) fn physical(cpu_dir: &Path) -> Result<u64> {
    let mut cores = BTreeSet::new();

    for id in read_list(cpu_dir.join("online"))? {
        let topology = cpu_dir.join(format!("cpu{id}/topology"));
        let core_id = read_u64(topology.join("core_id"))?;
        let package_id = read_u64(topology.join("physical_package_id"))?;

        cores.insert((package_id, core_id));
    }

    Ok(cores.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn topology(cpu_dir: &Path, id: usize, package: u64, core: u64) {
        let dir = cpu_dir.join(format!("cpu{id}/topology"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("physical_package_id"), format!("{package}\n")).unwrap();
        fs::write(dir.join("core_id"), format!("{core}\n")).unwrap();
    }

    #[test]
    fn smt_siblings_share_a_core() {
        let dir = tempfile::tempdir().unwrap();
        let cpu_dir = dir.path();
        fs::write(cpu_dir.join("online"), "0-3\n").unwrap();
        topology(cpu_dir, 0, 0, 0);
        topology(cpu_dir, 1, 0, 1);
        topology(cpu_dir, 2, 0, 0);
        topology(cpu_dir, 3, 0, 1);

        assert_eq!(logical(cpu_dir).unwrap(), 4);
        assert_eq!(physical(cpu_dir).unwrap(), 2);
    }

    #[test]
    fn brand_is_first_model_name() {
        let dir = tempfile::tempdir().unwrap();
        let cpuinfo = dir.path().join("cpuinfo");
        fs::write(
            &cpuinfo,
            "processor\t: 0\nvendor_id\t: GenuineIntel\nmodel name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz\n\n\
             processor\t: 1\nmodel name\t: Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz\n",
        )
        .unwrap();

        assert_eq!(
            brand(&cpuinfo).unwrap(),
            "Intel(R) Xeon(R) CPU E5-2680 v4 @ 2.40GHz"
        );
    }

    #[test]
    fn brand_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cpuinfo = dir.path().join("cpuinfo");
        fs::write(&cpuinfo, "processor\t: 0\nBogoMIPS\t: 48.00\n").unwrap();

        assert_eq!(
            brand(&cpuinfo).unwrap_err().kind(),
            crate::ErrorKind::PropertyAbsent
        );
    }
}
