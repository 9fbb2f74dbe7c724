//! hotel-des — run the hotel front-desk and housekeeping simulation.
//!
//! With no arguments, runs the reference 200-room hotel for 14 days (7 days
//! warm-up) and prints the summary.  `--rooms 150,200,250` sweeps the room
//! count; `--output DIR` writes CSV (or Parquet) tables for every run.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hd_core::{HotelConfig, RoomRetryPolicy};
use hd_output::{CsvWriter, EventLogObserver, OutputWriter, ReportObserver, Tee};
use hd_schedule::load_profiles_csv;
use hd_sim::RunReport;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "hotel-des")]
#[command(about = "Discrete-event simulation of hotel check-in and room turnover", long_about = None)]
struct Args {
    /// JSON run configuration; missing fields take the reference values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Room counts to simulate; more than one runs a sweep
    #[arg(long, value_delimiter = ',')]
    rooms: Vec<u32>,

    /// Override the horizon, in days (warm-up included)
    #[arg(long)]
    days: Option<f64>,

    /// Override the warm-up, in days
    #[arg(long)]
    warmup_days: Option<f64>,

    /// Hourly profile CSV (hour,arrival_intensity,front_desk,housekeeping)
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// Rescale the arrival_intensity column to sum to 1
    #[arg(long, requires = "profiles")]
    normalize: bool,

    /// Waiting guests retry for a room on a fixed tick instead of on each
    /// cleaning completion
    #[arg(long, value_name = "HOURS")]
    retry_interval: Option<f64>,

    /// Directory for output tables
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write event_log.csv (single runs only)
    #[arg(long, requires = "output")]
    event_log: bool,

    /// Write Parquet instead of CSV (needs the `parquet` feature)
    #[arg(long, requires = "output")]
    parquet: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print each run report as JSON instead of the summary line
    #[arg(long)]
    json: bool,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<HotelConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => HotelConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(days) = args.days {
        config.horizon_hours = days * 24.0;
    }
    if let Some(days) = args.warmup_days {
        config.warmup_hours = days * 24.0;
    }
    if let [rooms] = args.rooms[..] {
        config.room_count = rooms;
    }
    if let Some(interval_hours) = args.retry_interval {
        config.room_retry = RoomRetryPolicy::Periodic { interval_hours };
    }
    if let Some(path) = &args.profiles {
        let table = load_profiles_csv(path, args.normalize)
            .with_context(|| format!("loading profiles {}", path.display()))?;
        table.apply_to(&mut config);
        info!(path = %path.display(), "applied hourly profiles");
    }

    config.validate()?;
    Ok(config)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn open_writer(dir: &Path, parquet: bool) -> Result<Box<dyn OutputWriter>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    if parquet {
        #[cfg(feature = "parquet")]
        return Ok(Box::new(hd_output::ParquetWriter::new(dir)?));
        #[cfg(not(feature = "parquet"))]
        bail!("--parquet needs hotel-des built with `--features parquet`");
    }
    Ok(Box::new(CsvWriter::new(dir)?))
}

fn scenario_label(config: &HotelConfig) -> String {
    format!("rooms={}", config.room_count)
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    let s = &report.summary;
    println!(
        "{:<11} avg wait {:>6.1} min | p95 {:>6.1} min | max {:>6.1} min | desk util {:>5.1}% | hk util {:>5.1}% | \
         occupancy {:>5.1}% | early check-in {:>5.1}% ({} tries) | check-ins {}",
        scenario_label(&report.config),
        s.avg_wait_hours * 60.0,
        s.total_pct.p95 * 60.0,
        s.max_wait_hours * 60.0,
        report.front_desk_utilization * 100.0,
        report.housekeeping_utilization * 100.0,
        s.occupancy_rate * 100.0,
        s.early_checkin_rate * 100.0,
        report.early_checkin.attempts,
        report.counts.checkins,
    );
    Ok(())
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn run_single(args: &Args, config: &HotelConfig) -> Result<RunReport> {
    let Some(dir) = &args.output else {
        return Ok(hd_sim::run(config)?);
    };

    let report_obs = ReportObserver::new(open_writer(dir, args.parquet)?, scenario_label(config));
    if args.event_log {
        let mut obs = Tee(report_obs, EventLogObserver::new(dir)?);
        let report = hd_sim::run_with_observer(config, &mut obs)?;
        if let Some(e) = obs.0.take_error().or_else(|| obs.1.take_error()) {
            return Err(e.into());
        }
        info!(rows = obs.1.rows(), "wrote event log");
        Ok(report)
    } else {
        let mut obs = report_obs;
        let report = hd_sim::run_with_observer(config, &mut obs)?;
        if let Some(e) = obs.take_error() {
            return Err(e.into());
        }
        Ok(report)
    }
}

fn run_sweep(args: &Args, base: &HotelConfig) -> Result<Vec<RunReport>> {
    if args.event_log {
        bail!("--event-log is only supported for a single run");
    }
    let configs = hd_sim::room_count_variants(base, &args.rooms);
    let mut writer = args
        .output
        .as_deref()
        .map(|dir| open_writer(dir, args.parquet))
        .transpose()?;

    let mut reports = Vec::with_capacity(configs.len());
    for (config, result) in configs.iter().zip(hd_sim::sweep(&configs)) {
        let label = scenario_label(config);
        let report = result.with_context(|| format!("scenario {label}"))?;
        if let Some(w) = writer.as_mut() {
            w.write_report(&label, &report)?;
        }
        reports.push(report);
    }
    if let Some(w) = writer.as_mut() {
        w.finish()?;
    }
    Ok(reports)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let started = Instant::now();
    let reports = if args.rooms.len() > 1 {
        run_sweep(&args, &config)?
    } else {
        vec![run_single(&args, &config)?]
    };

    for report in &reports {
        print_report(report, args.json)?;
    }
    info!(
        runs = reports.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "done"
    );
    if let Some(dir) = &args.output {
        info!(dir = %dir.display(), "output written");
    }
    Ok(())
}
