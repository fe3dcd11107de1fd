use std::path::{Path, PathBuf};

use super::util::*;
use crate::facts::power::{CURRENT_CAPACITY_KEY, IS_CHARGING_KEY, MAX_CAPACITY_KEY};
use crate::platform::{PropertyMap, PropertyValue};
use crate::Result;

pub(crate) fn supplies(power_supply_dir: &Path) -> Vec<PathBuf> {
    list_dir(power_supply_dir)
        .into_iter()
        .map(|name| power_supply_dir.join(name))
        .collect()
}

/// Build the descriptor record of one power supply.
///
/// Batteries report either energy (µWh) or charge (µAh) counters, and some
/// only a `capacity` percentage. Mains adapters report none of these, so
/// their record carries no capacity keys.
pub(crate) fn record(supply: &Path) -> Result<PropertyMap> {
    let mut record = PropertyMap::new();

    // the type file is always present for a registered supply
    let kind = read_string(supply.join("type"))?;
    record.insert("Type".to_owned(), PropertyValue::String(kind));

    let counters = [("energy_now", "energy_full"), ("charge_now", "charge_full")];
    let capacity = counters.iter().find_map(|(now, full)| {
        let now = read_u64(supply.join(now)).ok()?;
        let full = read_u64(supply.join(full)).ok()?;
        Some((now, full))
    });

    let capacity = capacity.or_else(|| {
        read_u64(supply.join("capacity"))
            .ok()
            .map(|percent| (percent, 100))
    });

    if let Some((now, full)) = capacity {
        record.insert(
            CURRENT_CAPACITY_KEY.to_owned(),
            PropertyValue::Integer(now as i64),
        );
        record.insert(
            MAX_CAPACITY_KEY.to_owned(),
            PropertyValue::Integer(full as i64),
        );
    }

    if let Ok(status) = read_string(supply.join("status")) {
        record.insert(
            IS_CHARGING_KEY.to_owned(),
            PropertyValue::Bool(status.eq_ignore_ascii_case("charging")),
        );
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn supply(dir: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let path = dir.join(name);
        fs::create_dir_all(&path).unwrap();
        for (file, content) in files {
            fs::write(path.join(file), format!("{content}\n")).unwrap();
        }
        path
    }

    #[test]
    fn energy_counters() {
        let dir = tempfile::tempdir().unwrap();
        let bat = supply(
            dir.path(),
            "BAT0",
            &[
                ("type", "Battery"),
                ("status", "Charging"),
                ("energy_now", "40000000"),
                ("energy_full", "50000000"),
                ("capacity", "80"),
            ],
        );

        let record = record(&bat).unwrap();
        assert_eq!(
            record.get(CURRENT_CAPACITY_KEY),
            Some(&PropertyValue::Integer(40_000_000))
        );
        assert_eq!(
            record.get(MAX_CAPACITY_KEY),
            Some(&PropertyValue::Integer(50_000_000))
        );
        assert_eq!(
            record.get(IS_CHARGING_KEY),
            Some(&PropertyValue::Bool(true))
        );
    }

    #[test]
    fn capacity_percentage_only() {
        let dir = tempfile::tempdir().unwrap();
        let bat = supply(
            dir.path(),
            "BAT1",
            &[("type", "Battery"), ("status", "Discharging"), ("capacity", "57")],
        );

        let record = record(&bat).unwrap();
        assert_eq!(
            record.get(CURRENT_CAPACITY_KEY),
            Some(&PropertyValue::Integer(57))
        );
        assert_eq!(
            record.get(MAX_CAPACITY_KEY),
            Some(&PropertyValue::Integer(100))
        );
        assert_eq!(
            record.get(IS_CHARGING_KEY),
            Some(&PropertyValue::Bool(false))
        );
    }

    #[test]
    fn mains_has_no_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let ac = supply(dir.path(), "AC", &[("type", "Mains"), ("online", "1")]);

        let record = record(&ac).unwrap();
        assert!(record.get(CURRENT_CAPACITY_KEY).is_none());
        assert!(record.get(MAX_CAPACITY_KEY).is_none());
    }

    #[test]
    fn supplies_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        supply(dir.path(), "BAT0", &[("type", "Battery")]);
        supply(dir.path(), "AC", &[("type", "Mains")]);

        assert_eq!(
            supplies(dir.path()),
            vec![dir.path().join("AC"), dir.path().join("BAT0")]
        );
    }
}
