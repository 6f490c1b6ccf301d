#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Ok,
    Warn,
    Critical,
}

pub const WARN_THRESHOLD: f64 = 50.0;
pub const CRITICAL_THRESHOLD: f64 = 80.0;

impl Band {
    pub fn from_percent(percent: f64) -> Self {
        let percent = clamp_percent(percent);
        if percent < WARN_THRESHOLD {
            Band::Ok
        } else if percent < CRITICAL_THRESHOLD {
            Band::Warn
        } else {
            Band::Critical
        }
    }
}

/// Clamps a reading into `[0, 100]`. NaN counts as an unavailable metric.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_split_into_three_bands() {
        assert_eq!(Band::from_percent(0.0), Band::Ok);
        assert_eq!(Band::from_percent(49.9), Band::Ok);
        assert_eq!(Band::from_percent(50.0), Band::Warn);
        assert_eq!(Band::from_percent(79.99), Band::Warn);
        assert_eq!(Band::from_percent(80.0), Band::Critical);
        assert_eq!(Band::from_percent(100.0), Band::Critical);
    }

    #[test]
    fn out_of_range_readings_use_nearest_bound() {
        assert_eq!(Band::from_percent(-12.0), Band::Ok);
        assert_eq!(Band::from_percent(250.0), Band::Critical);
        assert_eq!(clamp_percent(-0.5), 0.0);
        assert_eq!(clamp_percent(100.1), 100.0);
        assert_eq!(clamp_percent(f64::NAN), 0.0);
        assert_eq!(clamp_percent(f64::INFINITY), 100.0);
    }
}
