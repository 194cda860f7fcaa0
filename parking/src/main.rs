//! Parking lot ledger CLI.
//!
//! Keeps the ledger in memory for a single invocation: `run` applies a
//! command script (or stdin), `demo` replays the built-in sample scenario and
//! `fee` quotes a price without touching any ledger.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use parking::core::ledger::Ledger;
use parking::core::tariff::{Category, fee};
use parking::demo::run_demo;
use parking::exit_codes;
use parking::io::clock::SystemClock;
use parking::io::config::{DEFAULT_CONFIG_FILE, ParkingConfig, load_config};
use parking::logging;
use parking::session::Session;

#[derive(Parser)]
#[command(name = "parking", version, about = "In-memory parking lot ledger")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured lot capacity.
    #[arg(long, global = true)]
    capacity: Option<usize>,

    /// Print `list` and `report` results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply `admit`, `release`, `list` and `report` commands, one per line.
    Run {
        /// Read commands from this file instead of stdin.
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// Check in the sample fleet, check two vehicles out and report.
    Demo,
    /// Quote the fee for a stay.
    Fee {
        category: Category,
        minutes: u64,
        /// Apply the discount card reduction.
        #[arg(long)]
        discount: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Fee {
            category,
            minutes,
            discount,
        } => {
            println!("{}", fee(category, minutes, discount));
            Ok(())
        }
        Command::Run { ref script } => {
            let mut session = open_session(&cli)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match script {
                Some(path) => {
                    let file =
                        File::open(path).with_context(|| format!("open {}", path.display()))?;
                    session.run_script(BufReader::new(file), &mut out)?;
                }
                None => {
                    session.run_script(io::stdin().lock(), &mut out)?;
                }
            }
            Ok(())
        }
        Command::Demo => {
            let mut session = open_session(&cli)?;
            run_demo(&mut session, &mut io::stdout().lock())
        }
    }
}

fn open_session(cli: &Cli) -> Result<Session<SystemClock>> {
    let cfg = resolve_config(cli)?;
    debug!(capacity = cfg.capacity, json = cfg.json, "opening ledger");
    let ledger = Ledger::new(cfg.capacity).context("create ledger")?;
    Ok(Session::new(ledger, SystemClock, cfg.json))
}

fn resolve_config(cli: &Cli) -> Result<ParkingConfig> {
    load_config(&cli.config)?
        .with_overrides(cli.capacity, cli.json)
        .context("apply command-line overrides")
}
