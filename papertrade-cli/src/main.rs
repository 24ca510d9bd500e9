//! papertrade CLI: interactive trading simulator and grade tracker.
//!
//! Commands:
//! - `trade`: run the stock trading menu against the saved portfolio
//! - `grades`: run the in-memory student grade tracker

mod console;
mod grade_menu;
mod trade_menu;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use papertrade_core::Gradebook;
use papertrade_runner::{SimConfig, TradingSession};
use std::io;
use std::path::PathBuf;

use crate::console::Console;

#[derive(Parser)]
#[command(
    name = "papertrade",
    about = "papertrade: paper stock trading simulator and grade tracker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the trading menu. Flags override values from the config file.
    Trade {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding portfolio.csv, transactions.csv and performance.csv.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Starting cash for a new portfolio.
        #[arg(long)]
        cash: Option<f64>,

        /// Seed for the price walk. Defaults to OS entropy.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the student grade tracker.
    Grades,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Trade {
            config,
            data_dir,
            cash,
            seed,
        } => run_trade(config, data_dir, cash, seed),
        Commands::Grades => run_grades(),
    }
}

fn run_trade(
    config: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    cash: Option<f64>,
    seed: Option<u64>,
) -> Result<()> {
    let mut sim = match config {
        Some(path) => SimConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(dir) = data_dir {
        sim.data_dir = dir;
    }
    if let Some(cash) = cash {
        sim.starting_cash = cash;
    }
    if seed.is_some() {
        sim.seed = seed;
    }

    let today = chrono::Local::now().date_naive();
    let mut session = TradingSession::from_config(&sim, today).context("opening trading session")?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    trade_menu::run(&mut session, &mut console)
}

fn run_grades() -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    grade_menu::run(&mut Gradebook::new(), &mut console)
}
