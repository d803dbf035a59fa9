use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_shift::config::SimulationConfig;
use u_shift::models::{AppointmentStatus, PatientRecord};
use u_shift::scheduler::{ShiftKpi, ShiftScheduler};
use u_shift::store::HospitalStore;

#[derive(Parser)]
#[command(
    name = "u-shift",
    version,
    about = "Hospital shift simulation with greedy earliest-available staff assignment",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a fresh store, simulate shifts, and print the report
    Run {
        /// Configuration file
        #[arg(short, long, default_value = "config/hospital.json")]
        config: PathBuf,

        /// Shift to simulate (repeatable; defaults to every configured shift)
        #[arg(short, long = "shift")]
        shifts: Vec<String>,

        /// Override shift start (HH:MM, requires --end)
        #[arg(long, requires = "end")]
        start: Option<String>,

        /// Override shift end (HH:MM, requires --start)
        #[arg(long, requires = "start")]
        end: Option<String>,

        /// Calendar day the shifts are anchored to (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Random seed (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Patients generated per shift (overrides num_patients)
        #[arg(long)]
        patients: Option<usize>,
    },

    /// Load and validate a configuration file
    Check {
        /// Configuration file
        #[arg(short, long, default_value = "config/hospital.json")]
        config: PathBuf,
    },
}

#[derive(Serialize)]
struct Report {
    date: NaiveDate,
    seed: Option<u64>,
    shifts: Vec<ShiftKpi>,
    status_counts: BTreeMap<AppointmentStatus, usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Run {
            config,
            shifts,
            start,
            end,
            date,
            seed,
            patients,
        } => {
            tracing::info!(config = %config.display(), shifts = ?shifts, "Starting run command");
            let report = run(RunArgs {
                config: &config,
                shifts,
                start,
                end,
                date,
                seed,
                patients,
            })?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Check { config } => {
            tracing::info!(config = %config.display(), "Starting check command");
            check(&config)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("u_shift=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("u_shift=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

struct RunArgs<'a> {
    config: &'a Path,
    shifts: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    date: Option<NaiveDate>,
    seed: Option<u64>,
    patients: Option<usize>,
}

fn run(args: RunArgs<'_>) -> Result<Report> {
    let config = SimulationConfig::load(args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    let policy = config.policy()?;

    let seed = args.seed.or(config.seed);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let shifts = if args.shifts.is_empty() {
        config.shifts.clone()
    } else {
        args.shifts
    };
    let per_shift = args.patients.unwrap_or(config.num_patients);

    let windows = shifts
        .iter()
        .map(|shift| {
            config
                .window_for(shift, date, args.start.as_deref(), args.end.as_deref())
                .with_context(|| format!("Invalid window for shift {shift}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut store = HospitalStore::new();
    store.populate_roster(&config, &mut rng)?;
    for window in &windows {
        store.populate_patients(per_shift, window, &mut rng);
    }

    let patients = store
        .patient_queue()
        .iter()
        .map(PatientRecord::parse)
        .collect::<u_shift::Result<Vec<_>>>()?;

    let scheduler = ShiftScheduler::new(policy);
    let mut kpis = Vec::with_capacity(windows.len());
    for window in &windows {
        let staff = store.eligible_staff(&window.name);
        let outcome = scheduler
            .run_shift(store.patient_queue(), &staff, window, &mut rng)
            .with_context(|| format!("Shift {} failed", window.name))?;
        kpis.push(ShiftKpi::calculate(&outcome, &patients, window));
        store.record(outcome.appointments);
    }

    Ok(Report {
        date,
        seed,
        shifts: kpis,
        status_counts: store.status_counts(),
    })
}

fn check(path: &Path) -> Result<()> {
    let config = SimulationConfig::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    let policy = config.policy()?;

    println!("Configuration OK: {}", path.display());
    println!("  Departments: {}", config.departments_info.len());
    println!(
        "  Clinical departments: {}",
        config.departments_info.iter().filter(|d| d.is_clinical).count()
    );
    println!("  Patients per populate: {}", config.num_patients);
    println!(
        "  Cancellation rate: {:.2}",
        policy.cancellation_rate.value()
    );
    println!(
        "  Duration range: {}-{} min",
        policy.duration_range.min(),
        policy.duration_range.max()
    );
    for shift in &config.shifts {
        let times = config.shift_times_for(shift);
        println!("  Shift {shift}: {}-{}", times.start, times.end);
    }

    Ok(())
}
