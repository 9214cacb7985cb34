//! System statistics from `sysinfo`

use std::fs;
use std::path::{Path, PathBuf};

use startdash_core::collaborators::{SystemMonitor, SystemStats, UNAVAILABLE};
use sysinfo::{Disks, System};

/// Linux battery class directory
const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// CPU, memory and disk usage via `sysinfo`, battery via the kernel
pub struct SysinfoMonitor {
    system: System,
    disks: Disks,
    power_supply_dir: PathBuf,
}

impl Default for SysinfoMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoMonitor {
    pub fn new() -> Self {
        let mut system = System::new();
        // CPU usage is a delta between two refreshes; prime the first one
        system.refresh_cpu_usage();
        system.refresh_memory();

        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            power_supply_dir: PathBuf::from(POWER_SUPPLY_DIR),
        }
    }

    fn disk_usage(&mut self) -> f64 {
        self.disks.refresh_list();

        let (total, available) = self
            .disks
            .list()
            .iter()
            .fold((0u64, 0u64), |(total, available), disk| {
                (
                    total.saturating_add(disk.total_space()),
                    available.saturating_add(disk.available_space()),
                )
            });

        if total == 0 {
            return UNAVAILABLE;
        }
        percent(total.saturating_sub(available), total)
    }
}

impl SystemMonitor for SysinfoMonitor {
    fn stats(&mut self) -> SystemStats {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let memory_usage = percent(self.system.used_memory(), self.system.total_memory());
        let (battery_level, is_charging) = read_battery(&self.power_supply_dir);

        SystemStats {
            cpu_usage: f64::from(self.system.global_cpu_usage()).clamp(0.0, 100.0),
            memory_usage,
            disk_usage: self.disk_usage(),
            battery_level,
            is_charging,
        }
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (used as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Read the first battery under a power_supply class directory
///
/// Returns `(UNAVAILABLE, false)` when there is no battery.
pub fn read_battery(dir: &Path) -> (f64, bool) {
    let Ok(entries) = fs::read_dir(dir) else {
        return (UNAVAILABLE, false);
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let kind = read_trimmed(&path.join("type"));
        if kind.as_deref() != Some("Battery") {
            continue;
        }

        let Some(capacity) = read_trimmed(&path.join("capacity")).and_then(|c| c.parse::<f64>().ok())
        else {
            continue;
        };
        let charging = matches!(
            read_trimmed(&path.join("status")).as_deref(),
            Some("Charging") | Some("Full")
        );
        return (capacity.clamp(0.0, 100.0), charging);
    }

    (UNAVAILABLE, false)
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}
