//! Host resource readout: memory and CPU usage for the status panel and "Read RAM".

use sysinfo::System;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory figures in bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
}

impl MemoryStats {
    pub fn read() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        Self {
            total: sys.total_memory(),
            available: sys.available_memory(),
            used: sys.used_memory(),
            free: sys.free_memory(),
        }
    }

    /// Share of memory not available to new processes, in percent.
    pub fn percent_used(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.total.saturating_sub(self.available)) as f64 / self.total as f64 * 100.0
    }
}

/// Bytes rendered as GiB with two decimals.
pub fn gib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / GIB)
}

/// Combined memory + CPU snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSnapshot {
    pub memory: MemoryStats,
    pub cpu_percent: f32,
}

impl SystemSnapshot {
    /// Sample CPU usage over the minimum interval sysinfo needs.
    pub async fn sample() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();
        tokio::time::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).await;
        sys.refresh_cpu();
        Self {
            memory: MemoryStats::read(),
            cpu_percent: sys.global_cpu_info().cpu_usage(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "RAM {:.1}% ({} GB / {} GB)   CPU {:.1}%",
            self.memory.percent_used(),
            gib(self.memory.used),
            gib(self.memory.total),
            self.cpu_percent
        )
    }
}
