use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use serde::Serialize;
use serde_json::Value;

use crate::app::App;
use crate::system::collector::StatsProvider;
use crate::ui;

const TRACKED_SPANS: [&str; 3] = ["collector.collect", "ui.compose_frame", "ui.draw"];

#[derive(Debug, Clone)]
pub struct PerfCapture {
    pub iterations: usize,
    pub width: u16,
    pub height: u16,
    pub span_log: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct PerfSummary {
    pub iterations: usize,
    pub width: u16,
    pub height: u16,
    pub max_process_rows: usize,
    pub spans: BTreeMap<String, SpanStats>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SpanStats {
    pub count: usize,
    pub p50_us: f64,
    pub p95_us: f64,
    pub max_us: f64,
}

pub fn run_capture(
    app: &mut App,
    provider: &mut dyn StatsProvider,
    capture: &PerfCapture,
) -> Result<PerfSummary> {
    if capture.iterations == 0 {
        return Err(eyre!("--perf-iterations must be greater than 0"));
    }
    if capture.width == 0 || capture.height == 0 {
        return Err(eyre!(
            "--perf-width and --perf-height must be greater than 0"
        ));
    }

    let backend = TestBackend::new(capture.width, capture.height);
    let mut terminal = Terminal::new(backend)?;
    app.on_resize(capture.width, capture.height);

    let mut max_process_rows = 0;
    for _ in 0..capture.iterations {
        let snapshot = Arc::new(provider.collect());
        max_process_rows = max_process_rows.max(snapshot.processes.len());
        app.on_snapshot(snapshot);
        terminal.draw(|frame| ui::draw(frame, app))?;
    }

    let summary = PerfSummary {
        iterations: capture.iterations,
        width: capture.width,
        height: capture.height,
        max_process_rows,
        spans: parse_span_stats(&capture.span_log)?,
    };

    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(summary_path(&capture.span_log), json)?;
    Ok(summary)
}

pub fn summary_path(span_log: &Path) -> PathBuf {
    span_log.with_extension("summary.json")
}

fn parse_span_stats(path: &Path) -> Result<BTreeMap<String, SpanStats>> {
    let reader = BufReader::new(File::open(path)?);
    let mut samples: BTreeMap<String, Vec<f64>> = TRACKED_SPANS
        .iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for line in reader.lines() {
        let line = line?;
        let Some((name, busy_us)) = span_timing(&line) else {
            continue;
        };
        if let Some(values) = samples.get_mut(name.as_str()) {
            values.push(busy_us);
        }
    }

    Ok(samples
        .into_iter()
        .map(|(name, mut values)| {
            let stats = summarize_samples(&mut values);
            (name, stats)
        })
        .collect())
}

fn span_timing(line: &str) -> Option<(String, f64)> {
    let record: Value = serde_json::from_str(line.trim()).ok()?;
    let name = record.pointer("/span/name")?.as_str()?;
    let busy = record.pointer("/fields/time.busy")?.as_str()?;
    Some((name.to_string(), parse_duration_to_us(busy)?))
}

/// Nanoseconds per unit for the suffixes tracing-subscriber prints in
/// `time.busy`. Bare `s` comes last so it never shadows `ms` or `ns`.
const DURATION_UNITS: [(&str, f64); 6] = [
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("μs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
];

fn parse_duration_to_us(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    DURATION_UNITS.iter().find_map(|&(suffix, ns_per_unit)| {
        let number = raw.strip_suffix(suffix)?;
        number
            .trim()
            .parse::<f64>()
            .ok()
            .map(|n| n * ns_per_unit / 1_000.0)
    })
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * q).round() as usize;
    round_2(sorted[idx])
}

fn summarize_samples(values: &mut [f64]) -> SpanStats {
    values.sort_by(f64::total_cmp);
    match values.last() {
        None => SpanStats {
            count: 0,
            p50_us: 0.0,
            p95_us: 0.0,
            max_us: 0.0,
        },
        Some(&max) => SpanStats {
            count: values.len(),
            p50_us: percentile(values, 0.50),
            p95_us: percentile(values, 0.95),
            max_us: round_2(max),
        },
    }
}

fn round_2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
