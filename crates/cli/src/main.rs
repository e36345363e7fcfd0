//! Pacer CLI - drives a tracker over a simulated step loop.

use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use pacer_core::SystemClock;
use pacer_progress::{DisplayMode, Fidelity, TerminalSink, Tracker, TrackerConfig};
use tracing::info;

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "Terminal step-progress demo", long_about = None)]
struct Cli {
    /// Label shown in regular and advanced modes
    #[arg(long, default_value = "working")]
    label: String,

    /// Total number of steps
    #[arg(long, default_value = "50")]
    steps: i64,

    /// Width of the bar in blocks
    #[arg(long, default_value = "20")]
    blocks: i64,

    /// Frame layout
    #[arg(long, value_enum, default_value = "advanced")]
    mode: Mode,

    /// Force whole-block ASCII rendering
    #[arg(long)]
    coarse: bool,

    /// Delay between steps in milliseconds
    #[arg(long, default_value = "100")]
    delay_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Simple,
    Regular,
    Advanced,
}

impl From<Mode> for DisplayMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Simple => DisplayMode::Simple,
            Mode::Regular => DisplayMode::Regular,
            Mode::Advanced => DisplayMode::Advanced,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; the tracker owns the stdout line.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let fidelity = if cli.coarse {
        Fidelity::Coarse
    } else {
        Fidelity::detect()
    };
    info!(steps = cli.steps, ?fidelity, "starting tracked run");

    let config = TrackerConfig {
        label: Some(cli.label),
        total_steps: cli.steps,
        block_count: cli.blocks,
        mode: cli.mode.into(),
        fidelity,
    };

    let mut tracker = Tracker::new(config, TerminalSink::stdout(), Rc::new(SystemClock))?;
    for _ in 0..cli.steps {
        std::thread::sleep(Duration::from_millis(cli.delay_ms));
        tracker.advance(1)?;
    }
    tracker.close()?;

    Ok(())
}
