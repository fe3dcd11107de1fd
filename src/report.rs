//! Text rendering of a [`HostReport`].

use std::fmt::Display;
use std::io::{self, Write};

use hostfacts::HostReport;

const NOT_AVAILABLE: &str = "Not available";

/// Write every section, in fixed order, separated by blank lines.
pub fn render<W: Write>(host: &HostReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Graphics Cards:")?;
    match &host.graphics_adapters {
        Some(adapters) if !adapters.is_empty() => bullets(out, adapters)?,
        _ => writeln!(out, "- {NOT_AVAILABLE}")?,
    }

    writeln!(out)?;
    match host.total_memory_mb {
        Some(mb) => writeln!(out, "Total System Memory: {mb} MB")?,
        None => writeln!(out, "Total System Memory: {NOT_AVAILABLE}")?,
    }

    writeln!(out)?;
    writeln!(out, "MAC Address: {}", or_not_available(&host.mac_address))?;

    writeln!(out)?;
    writeln!(out, "CPU Info: {}", or_not_available(&host.cpu_brand))?;

    writeln!(out)?;
    writeln!(out, "OS Version: {}", or_not_available(&host.os_release))?;

    writeln!(out)?;
    writeln!(out, "Disk Drives:")?;
    bullets(out, &host.disks)?;

    writeln!(out)?;
    writeln!(out, "Monitor Resolutions:")?;
    bullets(out, &host.resolutions)?;

    writeln!(out)?;
    writeln!(out, "Installed RAM Slots and Capacities:")?;
    match host.total_memory_mb {
        Some(mb) => writeln!(out, "- Total Installed RAM: {mb} MB")?,
        None => writeln!(out, "- Failed to retrieve RAM information")?,
    }

    writeln!(out)?;
    writeln!(out, "Battery Status:")?;
    write!(out, "{}", host.battery)?;

    writeln!(out)?;
    writeln!(out, "Running Processes:")?;
    bullets(
        out,
        host.processes
            .iter()
            .map(|process| &process.executable_path),
    )?;

    writeln!(out)?;
    writeln!(out, "System Uptime:")?;
    match &host.uptime {
        Some(uptime) => writeln!(out, "System Uptime: {uptime}")?,
        None => writeln!(out, "Failed to retrieve system uptime")?,
    }

    writeln!(out)?;
    writeln!(out, "Motherboard Information:")?;
    writeln!(out, "Hardware Model: {}", or_not_available(&host.board.model))?;
    writeln!(out, "Hardware Vendor: {}", or_not_available(&host.board.vendor))?;
    writeln!(out, "Serial Number: {}", or_not_available(&host.board.serial))?;

    writeln!(out)?;
    writeln!(out, "CPU Core Count:")?;
    writeln!(out, "{}", host.cores)?;

    Ok(())
}

fn bullets<W: Write, T: Display>(
    out: &mut W,
    entries: impl IntoIterator<Item = T>,
) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "- {entry}")?;
    }
    Ok(())
}

fn or_not_available<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|value| value.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}
