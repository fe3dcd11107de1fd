use crate::platform::{Platform, ScalarProperty};

pub mod disk;
pub mod display;
pub mod network;
pub mod power;
pub mod process;
pub mod scalar;
pub mod uptime;

pub use self::display::Resolution;
pub use self::network::MacAddress;
pub use self::power::{BatteryReport, BatteryStatus, PowerSourceRecord};
pub use self::process::ProcessRecord;
pub use self::scalar::{BoardInfo, CoreCount};
pub use self::uptime::Uptime;

/// Every fact of one report run.
///
/// Gathering never fails: a fact the host cannot provide is `None` or an
/// empty list.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct HostReport {
    pub graphics_adapters: Option<Vec<String>>,
    pub total_memory_mb: Option<u64>,
    pub mac_address: Option<MacAddress>,
    pub cpu_brand: Option<String>,
    pub os_release: Option<String>,
    pub disks: Vec<String>,
    pub resolutions: Vec<Resolution>,
    pub battery: BatteryReport,
    pub processes: Vec<ProcessRecord>,
    pub uptime: Option<Uptime>,
    pub board: BoardInfo,
    pub cores: CoreCount,
}

impl HostReport {
    /// Query every provider, one after another, in report order.
    pub fn collect<P: Platform>(platform: &P) -> Self {
        let graphics_adapters = platform
            .graphics_adapters()
            .map_err(|e| debug!("graphics adapters: {e}"))
            .ok();

        let total_memory_mb = scalar::total_memory_mb(platform);
        let mac_address = network::mac_address(platform);
        let cpu_brand = scalar::text(platform, ScalarProperty::CpuBrand);
        let os_release = scalar::text(platform, ScalarProperty::OsRelease);
        let disks = disk::disk_drives(platform);
        let resolutions = display::resolutions(platform);
        let battery = power::battery_report(platform);
        let processes = process::running_processes(platform);

        let uptime = uptime::system_uptime(platform)
            .map_err(|e| debug!("uptime: {e}"))
            .ok();

        let board = BoardInfo::new(platform);
        let cores = CoreCount::new(platform);

        Self {
            graphics_adapters,
            total_memory_mb,
            mac_address,
            cpu_brand,
            os_release,
            disks,
            resolutions,
            battery,
            processes,
            uptime,
            board,
            cores,
        }
    }
}
