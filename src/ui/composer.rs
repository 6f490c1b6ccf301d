use ratatui::text::{Line, Span, Text};

use crate::format::{percent_text, truncate_left};
use crate::layout::band::{Band, clamp_percent};
use crate::layout::grid::{self, CORE_GRID, HEADLINE_GRID, RowGeometry};
use crate::system::snapshot::{MetricsSnapshot, ProcessEntry};
use crate::ui::bar::render_bar;
use crate::ui::theme::Theme;

pub const LOADING: &str = "Loading...";

/// PID (10) + space + CPU% (5) + 2 spaces + MEM% (5) + 2 spaces.
pub const FIXED_COLUMNS_WIDTH: usize = 25;
pub const MIN_COMMAND_WIDTH: usize = 10;

pub const CORE_MARGIN: usize = 2;

const HEADLINE_ROWS: usize = 2;
const BLANK_LINE: usize = 1;
const HEADER_LINE: usize = 1;

struct Headline {
    label: &'static str,
    percent: f64,
    text_width: usize,
    precision: usize,
}

impl Headline {
    fn render(&self, width: usize, theme: &Theme) -> Line<'static> {
        let percent = clamp_percent(self.percent);
        let text = percent_text(percent, self.text_width, self.precision);
        render_bar(self.label, &text, percent, width, theme)
    }
}

pub fn loading_frame() -> Text<'static> {
    Text::from(LOADING)
}

pub fn compose_frame(
    snapshot: &MetricsSnapshot,
    width: u16,
    height: u16,
    theme: &Theme,
) -> Text<'static> {
    let _compose_span =
        tracing::debug_span!("ui.compose_frame", width = width, height = height).entered();

    if width == 0 {
        return loading_frame();
    }
    let width = usize::from(width);
    let mut lines: Vec<Line<'static>> = Vec::new();

    let headline = grid::bar_row(width, &HEADLINE_GRID);
    let headline_rows = [
        [
            Headline {
                label: "CPU Usage",
                percent: snapshot.cpu_usage,
                text_width: 5,
                precision: 1,
            },
            Headline {
                label: "GPU Usage",
                percent: snapshot.gpu_usage,
                text_width: 3,
                precision: 0,
            },
        ],
        [
            Headline {
                label: "Memory",
                percent: snapshot.memory_usage,
                text_width: 5,
                precision: 1,
            },
            Headline {
                label: "GPU Memory",
                percent: snapshot.gpu_memory_usage,
                text_width: 4,
                precision: 1,
            },
        ],
    ];
    for row in &headline_rows {
        let bars = row.iter().map(|h| h.render(headline.bar_width, theme));
        lines.push(join_bars(bars, &headline));
    }
    lines.push(Line::default());

    let cores = grid::bar_row(width.saturating_sub(CORE_MARGIN), &CORE_GRID);
    let core_bars = core_lines(&snapshot.cpu_cores, &cores, theme);
    let core_rows = core_bars.len();
    lines.extend(core_bars);
    lines.push(Line::default());

    let lines_used = HEADLINE_ROWS + BLANK_LINE + core_rows + BLANK_LINE + HEADER_LINE;
    let shown = grid::process_rows(usize::from(height), lines_used, snapshot.processes.len());

    lines.push(Line::from(Span::styled(
        format!("{:<10} {:>5}  {:>5}  {}", "PID", "CPU%", "MEM%", "COMMAND"),
        theme.table_header(),
    )));

    let command_width = width
        .saturating_sub(FIXED_COLUMNS_WIDTH)
        .max(MIN_COMMAND_WIDTH);
    lines.extend(
        snapshot.processes[..shown]
            .iter()
            .map(|p| process_line(p, command_width, theme)),
    );

    Text::from(lines)
}

fn core_lines(cores: &[f64], geometry: &RowGeometry, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(geometry.row_count(cores.len()));
    for (row_idx, row) in geometry.rows(cores).enumerate() {
        let bars = row.iter().enumerate().map(|(col, &usage)| {
            let core = row_idx * geometry.bars_per_row + col;
            let usage = clamp_percent(usage);
            render_bar(
                &format!("CPU{core:02}"),
                &percent_text(usage, 4, 1),
                usage,
                geometry.bar_width,
                theme,
            )
        });
        lines.push(join_bars(bars, geometry));
    }
    lines
}

fn join_bars(bars: impl Iterator<Item = Line<'static>>, geometry: &RowGeometry) -> Line<'static> {
    let gap = " ".repeat(geometry.spacing);
    let mut spans: Vec<Span<'static>> = Vec::new();
    for (idx, bar) in bars.enumerate() {
        if idx > 0 {
            spans.push(Span::raw(gap.clone()));
        }
        spans.extend(bar.spans);
    }
    Line::from(spans)
}

fn process_line(process: &ProcessEntry, command_width: usize, theme: &Theme) -> Line<'static> {
    let cpu = clamp_percent(process.cpu_percent);
    let mem = clamp_percent(process.mem_percent);
    Line::from(vec![
        Span::raw(format!("{:<10} ", process.pid)),
        Span::styled(format!("{cpu:5.1}"), theme.metric(Band::from_percent(cpu))),
        Span::raw("  "),
        Span::styled(format!("{mem:5.1}"), theme.metric(Band::from_percent(mem))),
        Span::raw("  "),
        Span::raw(truncate_left(&process.command, command_width)),
    ])
}
