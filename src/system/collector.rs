use std::sync::Arc;
use std::time::Duration;

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use super::gpu::GpuProbe;
use super::process::{MAX_PROCESSES, command_label, top_by_cpu};
use super::snapshot::{MetricsSnapshot, ProcessEntry, average_usage};

/// `collect` may block for the sampling window and never fails.
pub trait StatsProvider: Send {
    fn collect(&mut self) -> MetricsSnapshot;
}

pub struct Collector {
    sys: System,
    gpu: Arc<GpuProbe>,
    sample_window: Duration,
}

impl Collector {
    pub fn new(gpu: Arc<GpuProbe>, sample_window: Duration) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        Collector {
            sys,
            gpu,
            sample_window,
        }
    }

    fn refresh_processes(&mut self) {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_cpu()
                .with_memory()
                .with_exe(UpdateKind::OnlyIfNotSet),
        );
    }

    fn build_snapshot(&self) -> MetricsSnapshot {
        let cpu_cores: Vec<f64> = self
            .sys
            .cpus()
            .iter()
            .map(|cpu| f64::from(cpu.cpu_usage()))
            .collect();

        let total_memory = self.sys.total_memory();
        let memory_usage = if total_memory > 0 {
            self.sys.used_memory() as f64 / total_memory as f64 * 100.0
        } else {
            0.0
        };

        let entries = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessEntry {
                pid: pid.as_u32(),
                cpu_percent: f64::from(process.cpu_usage()),
                mem_percent: if total_memory > 0 {
                    process.memory() as f64 / total_memory as f64 * 100.0
                } else {
                    0.0
                },
                command: command_label(process.exe(), process.name()),
            })
            .collect();

        MetricsSnapshot {
            cpu_usage: average_usage(&cpu_cores),
            gpu_usage: self.gpu.usage(),
            memory_usage,
            gpu_memory_usage: self.gpu.memory_usage(),
            cpu_cores,
            processes: top_by_cpu(entries, MAX_PROCESSES),
        }
    }
}

impl StatsProvider for Collector {
    fn collect(&mut self) -> MetricsSnapshot {
        let _collect_span = tracing::debug_span!("collector.collect").entered();

        // CPU percentages are deltas between two refreshes, so bracket a
        // sampling window with them.
        self.sys.refresh_cpu_usage();
        self.refresh_processes();
        std::thread::sleep(self.sample_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        self.sys.refresh_cpu_usage();
        self.sys.refresh_memory();
        self.refresh_processes();

        let snapshot = self.build_snapshot();
        tracing::debug!(
            cores = snapshot.cpu_cores.len(),
            processes = snapshot.processes.len(),
            cpu = snapshot.cpu_usage,
            memory = snapshot.memory_usage,
            "snapshot collected"
        );
        snapshot
    }
}
