#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub cpu_usage: f64,
    pub gpu_usage: f64,
    pub memory_usage: f64,
    pub gpu_memory_usage: f64,
    pub cpu_cores: Vec<f64>,
    pub processes: Vec<ProcessEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    /// Executable path or process name; empty when neither could be read.
    pub command: String,
}

pub fn average_usage(cores: &[f64]) -> f64 {
    if cores.is_empty() {
        return 0.0;
    }
    cores.iter().sum::<f64>() / cores.len() as f64
}
