//! Battery charge decoded from power source descriptor records.

use core::fmt;

use crate::platform::{Platform, PropertyMap, PropertyValue, RawDeviceHandle};
use crate::{Error, Result};

pub const CURRENT_CAPACITY_KEY: &str = "Current Capacity";
pub const MAX_CAPACITY_KEY: &str = "Max Capacity";
pub const IS_CHARGING_KEY: &str = "Is Charging";

/// The fields of one descriptor record. Keys missing from the record stay
/// `None` rather than defaulting to zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerSourceRecord {
    pub current_capacity: Option<i64>,
    pub max_capacity: Option<i64>,
    pub is_charging: Option<PropertyValue>,
}

impl PowerSourceRecord {
    pub fn from_map(map: &PropertyMap) -> Self {
        Self {
            current_capacity: integer(map, CURRENT_CAPACITY_KEY),
            max_capacity: integer(map, MAX_CAPACITY_KEY),
            is_charging: map.get(IS_CHARGING_KEY).cloned(),
        }
    }
}

fn integer(map: &PropertyMap, key: &str) -> Option<i64> {
    match map.get(key)? {
        PropertyValue::Integer(value) => Some(*value),
        PropertyValue::String(value) => value.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatteryStatus {
    /// Whole percent, rounded down and kept within 0..=100.
    pub percentage: u8,
    pub charging_label: Option<String>,
}

impl BatteryStatus {
    /// Compute the charge of one source. A record without both capacities,
    /// or with a non-positive maximum, has no data to report.
    pub fn from_record(record: &PowerSourceRecord) -> Result<Self> {
        let (Some(current), Some(max)) = (record.current_capacity, record.max_capacity) else {
            return Err(Error::absent("power source capacity"));
        };

        if max <= 0 {
            return Err(Error::malformed(format!("max capacity of {max}")));
        }

        let percentage = (i128::from(current) * 100 / i128::from(max)).clamp(0, 100) as u8;

        Ok(Self {
            percentage,
            charging_label: record.is_charging.as_ref().and_then(charging_label),
        })
    }
}

fn charging_label(value: &PropertyValue) -> Option<String> {
    match value {
        PropertyValue::String(label) => Some(label.clone()),
        PropertyValue::Bool(true) => Some("Yes".to_owned()),
        PropertyValue::Bool(false) => Some("No".to_owned()),
        PropertyValue::Integer(v) => Some(if *v != 0 { "Yes" } else { "No" }.to_owned()),
        PropertyValue::Data(_) => None,
    }
}

impl fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Battery Percentage: {}%", self.percentage)?;
        if let Some(label) = &self.charging_label {
            writeln!(f, "Charging: {label}")?;
        }
        Ok(())
    }
}

/// Power facts of the whole host.
///
/// A host without any power source is reported differently from one whose
/// sources carry no usable charge data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatteryReport {
    NoSources,
    Sources(Vec<BatteryStatus>),
}

impl fmt::Display for BatteryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSources => writeln!(f, "No battery information available"),
            Self::Sources(sources) => sources.iter().try_for_each(|source| write!(f, "{source}")),
        }
    }
}

/// Decode every power source, in enumeration order.
pub fn battery_report<P: Platform>(platform: &P) -> BatteryReport {
    let sources = match platform.power_sources() {
        Ok(sources) => sources,
        Err(e) => {
            debug!("unable to enumerate power sources: {e}");
            return BatteryReport::NoSources;
        }
    };

    if sources.is_empty() {
        return BatteryReport::NoSources;
    }

    let mut ret = Vec::new();

    for source in sources {
        match decode(platform, &source) {
            Ok(status) => ret.push(status),
            Err(e) => debug!("no charge data for power source {}: {e}", source.id()),
        }
    }

    BatteryReport::Sources(ret)
}

fn decode<P: Platform>(
    platform: &P,
    source: &RawDeviceHandle<P::PowerSource>,
) -> Result<BatteryStatus> {
    let map = platform.power_source_record(source)?;
    BatteryStatus::from_record(&PowerSourceRecord::from_map(&map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::FakePlatform;

    fn record(current: Option<i64>, max: Option<i64>, charging: Option<PropertyValue>) -> PropertyMap {
        let mut map = PropertyMap::new();
        if let Some(current) = current {
            map.insert(CURRENT_CAPACITY_KEY.into(), PropertyValue::Integer(current));
        }
        if let Some(max) = max {
            map.insert(MAX_CAPACITY_KEY.into(), PropertyValue::Integer(max));
        }
        if let Some(charging) = charging {
            map.insert(IS_CHARGING_KEY.into(), charging);
        }
        map
    }

    #[test]
    fn percentage_rounds_down() {
        let record = PowerSourceRecord::from_map(&record(Some(2), Some(3), None));
        let status = BatteryStatus::from_record(&record).unwrap();
        assert_eq!(status.percentage, 66);
        assert_eq!(status.charging_label, None);
    }

    #[test]
    fn percentage_stays_in_range() {
        for max in 1..=50 {
            for current in 0..=max {
                let record = PowerSourceRecord::from_map(&record(Some(current), Some(max), None));
                let status = BatteryStatus::from_record(&record).unwrap();
                assert!(status.percentage <= 100, "{current}/{max}");
            }
        }
    }

    #[test]
    fn overfull_battery_is_clamped() {
        let record = PowerSourceRecord::from_map(&record(Some(5_200), Some(5_000), None));
        assert_eq!(BatteryStatus::from_record(&record).unwrap().percentage, 100);
    }

    #[test]
    fn zero_max_capacity_is_no_data() {
        let record = PowerSourceRecord::from_map(&record(Some(40), Some(0), None));
        assert!(BatteryStatus::from_record(&record).is_err());
    }

    #[test]
    fn absent_keys_stay_unset() {
        let record = PowerSourceRecord::from_map(&record(Some(40), None, None));
        assert_eq!(record.current_capacity, Some(40));
        assert_eq!(record.max_capacity, None);
        assert!(BatteryStatus::from_record(&record).is_err());
    }

    #[test]
    fn charging_labels() {
        let cases = [
            (PropertyValue::String("TRUE".into()), Some("TRUE")),
            (PropertyValue::Bool(true), Some("Yes")),
            (PropertyValue::Bool(false), Some("No")),
            (PropertyValue::Integer(1), Some("Yes")),
            (PropertyValue::Data(vec![1]), None),
        ];

        for (value, expected) in cases {
            let record = PowerSourceRecord::from_map(&record(Some(1), Some(2), Some(value)));
            let status = BatteryStatus::from_record(&record).unwrap();
            assert_eq!(status.charging_label.as_deref(), expected);
        }
    }

    #[test]
    fn no_sources() {
        let platform = FakePlatform::new();
        let report = battery_report(&platform);
        assert_eq!(report, BatteryReport::NoSources);
        assert_eq!(report.to_string(), "No battery information available\n");
    }

    #[test]
    fn source_missing_max_capacity_contributes_nothing() {
        let platform = FakePlatform::new()
            .with_power_source(record(Some(45), Some(50), Some(PropertyValue::Bool(true))))
            .with_power_source(record(Some(45), None, None));

        let report = battery_report(&platform);
        assert_eq!(
            report.to_string(),
            "Battery Percentage: 90%\nCharging: Yes\n"
        );
        assert_eq!(report.to_string().matches("Battery Percentage").count(), 1);
    }

    #[test]
    fn sources_without_data_are_not_no_sources() {
        let platform = FakePlatform::new()
            .with_power_source(record(None, None, None))
            .with_unreadable_power_source();

        let report = battery_report(&platform);
        assert_eq!(report, BatteryReport::Sources(Vec::new()));
        assert_eq!(report.to_string(), "");
        assert_eq!(platform.released(), 2);
    }
}
