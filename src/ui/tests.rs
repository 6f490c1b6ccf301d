use std::sync::Arc;

use insta::assert_snapshot;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::{Color, Modifier};

use crate::app::App;
use crate::system::snapshot::{MetricsSnapshot, ProcessEntry};
use crate::ui::composer::compose_frame;
use crate::ui::theme::Theme;
use crate::ui::{draw, plain_text};

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut rows = Vec::with_capacity(area.height as usize);
    for y in 0..area.height {
        let mut row = String::new();
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            row.push_str(cell.symbol());
        }
        rows.push(row.trim_end().to_string());
    }
    rows.join("\n").trim_end().to_string()
}

fn draw_to_string(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn make_process(pid: u32, cpu: f64, mem: f64, command: &str) -> ProcessEntry {
    ProcessEntry {
        pid,
        cpu_percent: cpu,
        mem_percent: mem,
        command: command.to_string(),
    }
}

fn make_snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        cpu_usage: 50.0,
        gpu_usage: 25.0,
        memory_usage: 60.0,
        gpu_memory_usage: 30.0,
        cpu_cores: vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0],
        processes: vec![make_process(1234, 10.5, 5.2, "/usr/bin/test")],
    }
}

#[test]
fn snapshot_frame_standard_terminal() {
    let frame = compose_frame(&make_snapshot(), 80, 24, &Theme::classic());
    let output = plain_text(&frame);
    assert_snapshot!("frame_80x24", output);
}

#[test]
fn snapshot_frame_drawn_on_narrow_terminal() {
    let mut snapshot = make_snapshot();
    snapshot.processes.extend([
        make_process(42, 3.0, 1.5, "/very/long/path/to/executable/with/many/parts"),
        make_process(7, 1.0, 0.4, "/sbin/init"),
    ]);
    let mut app = App::new(Theme::classic());
    app.on_resize(44, 14);
    app.on_snapshot(Arc::new(snapshot));

    let output = draw_to_string(&app, 44, 14);
    assert_snapshot!("frame_44x14_two_cores_per_row", output);
}

#[test]
fn snapshot_frame_overflowing_minimum_widths() {
    let snapshot = MetricsSnapshot {
        cpu_usage: 97.3,
        gpu_usage: 0.0,
        memory_usage: 120.0,
        gpu_memory_usage: -5.0,
        cpu_cores: vec![100.0, 0.0, 55.5],
        processes: vec![make_process(1, 250.0, 3.0, "/path/to/文件/executable")],
    };
    let frame = compose_frame(&snapshot, 30, 10, &Theme::classic());
    let output = plain_text(&frame);
    assert_snapshot!("frame_30x10_overflow", output);
}

#[test]
fn drawn_frame_matches_composed_text() {
    let mut app = App::new(Theme::classic());
    app.on_resize(80, 24);
    app.on_snapshot(Arc::new(make_snapshot()));

    let drawn = draw_to_string(&app, 80, 24);
    assert_eq!(drawn, plain_text(&app.frame_text()));
}

#[test]
fn drawn_bars_carry_band_colors() {
    let mut app = App::new(Theme::classic());
    app.on_resize(80, 24);
    app.on_snapshot(Arc::new(make_snapshot()));

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| draw(frame, &app)).unwrap();
    let buf = terminal.backend().buffer();

    // CPU Usage at 50%: the first 19 of 39 columns are filled (warn band).
    let filled = buf.cell((0, 0)).unwrap();
    assert_eq!(filled.symbol(), "C");
    assert_eq!(filled.bg, Color::Yellow);
    assert_eq!(filled.fg, Color::Black);
    assert!(filled.modifier.contains(Modifier::UNDERLINED));
    let unfilled = buf.cell((19, 0)).unwrap();
    assert_eq!(unfilled.fg, Color::Yellow);
    assert_eq!(unfilled.bg, Color::Reset);

    // GPU Usage at 25% stays in the ok band.
    let gpu = buf.cell((41, 0)).unwrap();
    assert_eq!(gpu.symbol(), "G");
    assert_eq!(gpu.bg, Color::Green);

    // Process table header is bold and underlined.
    let header = buf.cell((0, 6)).unwrap();
    assert_eq!(header.symbol(), "P");
    assert!(header.modifier.contains(Modifier::BOLD | Modifier::UNDERLINED));
}

#[test]
fn loading_placeholder_before_first_snapshot() {
    let mut app = App::new(Theme::classic());
    app.on_resize(80, 24);
    assert_eq!(draw_to_string(&app, 80, 24), "Loading...");
}
