use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;

use crate::system::gpu::GpuVendor;

pub const MIN_REFRESH_RATE_MS: u64 = 100;
const THEMES: [&str; 5] = ["auto", "classic", "vivid", "mono", "monochrome"];
const GPU_BACKENDS: [&str; 6] = ["auto", "nvidia", "amd", "rocm", "none", "off"];

#[derive(Debug, Clone)]
pub struct Config {
    pub refresh_rate_ms: u64,
    pub sample_window_ms: u64,
    pub theme: String,
    pub gpu: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            refresh_rate_ms: 3000,
            sample_window_ms: 1000,
            theme: "auto".to_string(),
            gpu: "auto".to_string(),
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_rate_ms)
    }

    pub fn sample_window(&self) -> Duration {
        Duration::from_millis(self.sample_window_ms)
    }

    pub fn gpu_vendor(&self) -> Option<GpuVendor> {
        GpuVendor::from_str_config(&self.gpu)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_rate_ms < MIN_REFRESH_RATE_MS {
            return Err(eyre!(
                "--refresh-rate must be at least {MIN_REFRESH_RATE_MS} ms (got {})",
                self.refresh_rate_ms
            ));
        }
        if self.sample_window_ms == 0 || self.sample_window_ms >= self.refresh_rate_ms {
            return Err(eyre!(
                "--sample-window must be between 1 and {} ms (got {})",
                self.refresh_rate_ms - 1,
                self.sample_window_ms
            ));
        }
        if !THEMES.contains(&self.theme.to_lowercase().as_str()) {
            return Err(eyre!(
                "unknown theme `{}` (expected one of: {})",
                self.theme,
                THEMES.join(", ")
            ));
        }
        if !GPU_BACKENDS.contains(&self.gpu.to_lowercase().as_str()) {
            return Err(eyre!(
                "unknown GPU backend `{}` (expected one of: {})",
                self.gpu,
                GPU_BACKENDS.join(", ")
            ));
        }
        Ok(())
    }
}
