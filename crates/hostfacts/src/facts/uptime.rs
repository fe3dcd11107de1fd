use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::platform::{FixedProperty, Platform};
use crate::{Error, Result};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Time since boot. Leftover seconds are dropped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Uptime {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl Uptime {
    pub fn from_secs(elapsed: u64) -> Self {
        Self {
            days: elapsed / SECONDS_PER_DAY,
            hours: (elapsed % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (elapsed % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }

    /// Elapsed whole seconds from `boot` to `now`. A boot time in the future,
    /// as seen after the clock was stepped back, counts as zero.
    pub fn between(boot: SystemTime, now: SystemTime) -> Self {
        let elapsed = match now.duration_since(boot) {
            Ok(elapsed) => elapsed,
            Err(e) => {
                warn!(
                    "boot time is {}s ahead of the clock, reporting zero uptime",
                    e.duration().as_secs()
                );
                Duration::ZERO
            }
        };

        Self::from_secs(elapsed.as_secs())
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days, {} hours, {} minutes",
            self.days, self.hours, self.minutes
        )
    }
}

pub fn system_uptime<P: Platform>(platform: &P) -> Result<Uptime> {
    let seconds = platform.fixed(FixedProperty::BootTime)?;
    let boot = UNIX_EPOCH
        .checked_add(Duration::from_secs(seconds))
        .ok_or_else(|| Error::malformed(format!("boot time of {seconds}s")))?;

    Ok(Uptime::between(boot, platform.now()))
}
