use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::KeyEventKind;

use gaugetop::app::App;
use gaugetop::config::Config;
use gaugetop::event::{Event, EventHandler};
use gaugetop::perf::{self, PerfCapture};
use gaugetop::system::collector::Collector;
use gaugetop::system::gpu::GpuProbe;
use gaugetop::ui::theme::Theme;
use gaugetop::{logging, ui};

#[derive(Parser)]
#[command(
    name = "gaugetop",
    about = "Terminal dashboard for CPU, memory, GPU and process load"
)]
struct Cli {
    /// Refresh interval in milliseconds
    #[arg(long, default_value_t = 3000)]
    refresh_rate: u64,

    /// CPU sampling window in milliseconds (must be shorter than the refresh interval)
    #[arg(long, default_value_t = 1000)]
    sample_window: u64,

    /// Color theme: auto, classic, vivid, mono
    #[arg(long, default_value = "auto")]
    theme: String,

    /// GPU backend: auto, nvidia, amd, none
    #[arg(long, default_value = "auto")]
    gpu: String,

    /// Write JSON logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run headless performance capture without interactive terminal.
    #[arg(long, default_value_t = false)]
    perf_capture: bool,

    /// Number of capture iterations for perf mode.
    #[arg(long, default_value_t = 120)]
    perf_iterations: usize,

    /// Headless terminal width for perf mode.
    #[arg(long, default_value_t = 120)]
    perf_width: u16,

    /// Headless terminal height for perf mode.
    #[arg(long, default_value_t = 40)]
    perf_height: u16,

    /// Perf tracing output file (JSON lines).
    #[arg(long, default_value = "target/perf/perf_spans.jsonl")]
    perf_output: PathBuf,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            refresh_rate_ms: self.refresh_rate,
            sample_window_ms: self.sample_window,
            theme: self.theme.clone(),
            gpu: self.gpu.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.config();
    config.validate()?;

    if cli.perf_capture {
        return run_perf_capture(&config, &cli);
    }

    if let Some(path) = &cli.log_file {
        logging::init_json(path, false)?;
    }

    let gpu = Arc::new(gpu_probe(&config));
    // Pay for vendor detection before the first frame instead of mid-tick.
    let vendor = gpu.vendor();
    tracing::info!(
        gpu = vendor.label(),
        refresh_ms = config.refresh_rate_ms,
        sample_ms = config.sample_window_ms,
        "starting dashboard"
    );

    let mut terminal = ratatui::try_init().wrap_err("failed to initialize terminal")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config, gpu).await;

    ratatui::restore();
    tracing::info!("dashboard stopped");

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: &Config,
    gpu: Arc<GpuProbe>,
) -> Result<()> {
    let mut app = App::new(Theme::from_config(&config.theme));
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    let collector = Collector::new(gpu, config.sample_window());
    let mut events = EventHandler::new(config.refresh_interval(), Box::new(collector));

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    let action = app.map_key(key);
                    app.dispatch(action);
                }
                false
            }
            Event::Resize(width, height) => {
                app.on_resize(width, height);
                true
            }
            Event::Snapshot(snapshot) => {
                app.on_snapshot(snapshot);
                true
            }
            Event::Interrupt => {
                app.running = false;
                false
            }
        };
        if should_draw && app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    Ok(())
}

fn gpu_probe(config: &Config) -> GpuProbe {
    match config.gpu_vendor() {
        Some(vendor) => GpuProbe::with_vendor(vendor),
        None => GpuProbe::new(),
    }
}

fn run_perf_capture(config: &Config, cli: &Cli) -> Result<()> {
    if cli.perf_output.exists() {
        std::fs::remove_file(&cli.perf_output)?;
    }
    logging::init_json(&cli.perf_output, true)?;

    let gpu = Arc::new(gpu_probe(config));
    let mut collector = Collector::new(gpu, config.sample_window());
    let mut app = App::new(Theme::from_config(&config.theme));
    let capture = PerfCapture {
        iterations: cli.perf_iterations,
        width: cli.perf_width,
        height: cli.perf_height,
        span_log: cli.perf_output.clone(),
    };

    let summary = perf::run_capture(&mut app, &mut collector, &capture)?;

    println!("Perf capture finished:");
    for (name, stats) in &summary.spans {
        println!(
            " - {name}: {} samples, p50 {:.2}us, p95 {:.2}us, max {:.2}us",
            stats.count, stats.p50_us, stats.p95_us, stats.max_us
        );
    }
    println!(" - {}", perf::summary_path(&cli.perf_output).display());
    Ok(())
}
