mod demo;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fleet_core::Roster;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use demo::{DemoScript, Transcript};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable walkthrough
    Console,
    /// Machine-readable transcript
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "fleet-demo", version = "0.1.0")]
#[command(
    about = "Fleet simulation walkthrough - every vehicle driven through one shared contract"
)]
struct Args {
    /// JSON roster to load instead of the built-in five-vehicle fleet
    #[arg(long)]
    fleet: Option<PathBuf>,

    /// JSON walkthrough script (speeds, trip distance, cargo loads); omitted fields keep defaults
    #[arg(long)]
    script: Option<PathBuf>,

    /// Trip length used for trip planning in km [default: 500]
    #[arg(long)]
    trip_distance: Option<f64>,

    /// Speed for the first acceleration test in km/h [default: 80]
    #[arg(long)]
    cruise_speed: Option<f64>,

    /// Speed for the second acceleration test in km/h [default: 150]
    #[arg(long)]
    high_speed: Option<f64>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let roster = load_roster(args.fleet.as_deref())?;
    let mut fleet = roster
        .build_fleet()
        .context("failed to build fleet from roster")?;

    let script = build_script(&args)?;
    let transcript = script.run(&mut fleet);
    write_report(&args, &transcript)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn load_roster(path: Option<&Path>) -> Result<Roster> {
    let Some(path) = path else {
        return Ok(Roster::load_from_static());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    Roster::from_json(&json).with_context(|| format!("failed to parse roster {}", path.display()))
}

/// Script file (or defaults) with any speed and distance flags layered on top.
fn build_script(args: &Args) -> Result<DemoScript> {
    let mut script = match args.script.as_deref() {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            serde_json::from_str::<DemoScript>(&json)
                .with_context(|| format!("failed to parse script {}", path.display()))?
        }
        None => DemoScript::default(),
    };
    if let Some(speed) = args.cruise_speed {
        script.cruise_speed = speed;
    }
    if let Some(speed) = args.high_speed {
        script.high_speed = speed;
    }
    if let Some(distance) = args.trip_distance {
        script.trip_distance = distance;
    }
    Ok(script)
}

fn write_report(args: &Args, transcript: &Transcript) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => reports::generate_json_report(output_target.writer(), transcript)?,
        ReportFormat::Console => {
            reports::generate_console_report(output_target.writer(), transcript)?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
