use std::process::Command;
use std::sync::OnceLock;

const NVIDIA_SMI: &str = "nvidia-smi";
const ROCM_SMI: &str = "rocm-smi";
const NVIDIA_UTILIZATION_ARGS: [&str; 2] = [
    "--query-gpu=utilization.gpu",
    "--format=csv,noheader,nounits",
];
const NVIDIA_MEMORY_ARGS: [&str; 2] = [
    "--query-gpu=memory.used,memory.total",
    "--format=csv,noheader,nounits",
];
const ROCM_USAGE_ARGS: [&str; 1] = ["--showuse"];
const ROCM_VRAM_ARGS: [&str; 2] = ["--showmeminfo", "vram"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpuVendor {
    None,
    Nvidia,
    Amd,
}

impl GpuVendor {
    pub fn label(self) -> &'static str {
        match self {
            GpuVendor::None => "none",
            GpuVendor::Nvidia => "nvidia",
            GpuVendor::Amd => "amd",
        }
    }

    /// `None` means "auto": detect on first use.
    pub fn from_str_config(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nvidia" => Some(GpuVendor::Nvidia),
            "amd" | "rocm" => Some(GpuVendor::Amd),
            "none" | "off" => Some(GpuVendor::None),
            _ => None,
        }
    }
}

/// GPU vendor tooling, detected at most once per process.
#[derive(Debug, Default)]
pub struct GpuProbe {
    vendor: OnceLock<GpuVendor>,
}

impl GpuProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vendor(vendor: GpuVendor) -> Self {
        Self {
            vendor: OnceLock::from(vendor),
        }
    }

    pub fn vendor(&self) -> GpuVendor {
        self.vendor_or_detect_with(detect_vendor)
    }

    pub fn vendor_or_detect_with(&self, detect: impl FnOnce() -> GpuVendor) -> GpuVendor {
        *self.vendor.get_or_init(detect)
    }

    pub fn usage(&self) -> f64 {
        match self.vendor() {
            GpuVendor::Nvidia => query(NVIDIA_SMI, &NVIDIA_UTILIZATION_ARGS)
                .map(|out| parse_nvidia_utilization(&out))
                .unwrap_or(0.0),
            GpuVendor::Amd => query(ROCM_SMI, &ROCM_USAGE_ARGS)
                .map(|out| parse_rocm_usage(&out))
                .unwrap_or(0.0),
            GpuVendor::None => 0.0,
        }
    }

    pub fn memory_usage(&self) -> f64 {
        match self.vendor() {
            GpuVendor::Nvidia => query(NVIDIA_SMI, &NVIDIA_MEMORY_ARGS)
                .map(|out| parse_nvidia_memory(&out))
                .unwrap_or(0.0),
            GpuVendor::Amd => query(ROCM_SMI, &ROCM_VRAM_ARGS)
                .map(|out| parse_rocm_vram(&out))
                .unwrap_or(0.0),
            GpuVendor::None => 0.0,
        }
    }
}

fn detect_vendor() -> GpuVendor {
    let vendor = if query(NVIDIA_SMI, &NVIDIA_UTILIZATION_ARGS).is_some() {
        GpuVendor::Nvidia
    } else if query(ROCM_SMI, &ROCM_USAGE_ARGS).is_some() {
        GpuVendor::Amd
    } else {
        GpuVendor::None
    };
    tracing::info!(vendor = vendor.label(), "gpu vendor detected");
    vendor
}

fn query(program: &str, args: &[&str]) -> Option<String> {
    let output = match Command::new(program).args(args).output() {
        Ok(output) => output,
        Err(err) => {
            tracing::debug!(program, error = %err, "gpu tool unavailable");
            return None;
        }
    };
    if !output.status.success() {
        tracing::debug!(program, status = %output.status, "gpu tool failed");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn parse_nvidia_utilization(output: &str) -> f64 {
    output
        .lines()
        .next()
        .and_then(|line| line.trim().parse().ok())
        .unwrap_or(0.0)
}

pub fn parse_nvidia_memory(output: &str) -> f64 {
    let Some(line) = output.lines().next() else {
        return 0.0;
    };
    let parts: Vec<&str> = line.trim().split(", ").collect();
    let [used, total] = parts.as_slice() else {
        return 0.0;
    };
    match (used.trim().parse::<f64>(), total.trim().parse::<f64>()) {
        (Ok(used), Ok(total)) if total > 0.0 => used / total * 100.0,
        _ => 0.0,
    }
}

/// `rocm-smi --showuse`, e.g. `GPU[0]\t\t: GPU use (%): 25`.
pub fn parse_rocm_usage(output: &str) -> f64 {
    output
        .lines()
        .filter(|line| line.trim_start().starts_with("GPU[0]") && line.contains("GPU use (%)"))
        .find_map(|line| value_after_last_colon(line)?.parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn parse_rocm_vram(output: &str) -> f64 {
    let mut total = None;
    let mut used = None;

    for line in output.lines() {
        if !line.trim_start().starts_with("GPU[0]") {
            continue;
        }
        if line.contains("VRAM Total Memory (B)") && !line.contains("Used") {
            total = total.or_else(|| value_after_last_colon(line)?.parse::<f64>().ok());
        } else if line.contains("VRAM Total Used Memory (B)") {
            used = used.or_else(|| value_after_last_colon(line)?.parse::<f64>().ok());
        }
        if total.is_some() && used.is_some() {
            break;
        }
    }

    match (used, total) {
        (Some(used), Some(total)) if total > 0.0 => used / total * 100.0,
        _ => 0.0,
    }
}

fn value_after_last_colon(line: &str) -> Option<&str> {
    line.rsplit_once(':').map(|(_, value)| value.trim())
}
