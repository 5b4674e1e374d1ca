//! kci - KernelCI dashboard results from the command line
//!
//! `kci results` resolves a tree/branch/commit (explicitly, from the latest
//! dashboard data, or from a local checkout) and prints its summary, builds,
//! boots or tests.

#![forbid(unsafe_code)]

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{Context, Output, ResultsCommand};
use kci_common::{DashboardClient, KciConfig, LogConfig, init_logging};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "kci")]
#[command(author, version, about = "KernelCI results from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// [Experimental] Get results from the dashboard
    Results {
        #[command(subcommand)]
        command: ResultsCommand,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env("info").with_stderr();
    if cli.verbose {
        log_config = log_config.with_level("debug");
    }
    let logging = init_logging(&log_config);
    if let Err(e) = &logging {
        eprintln!("kci: {e:#}");
    }

    if !io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if logging.is_ok() {
                error!("{e:#}");
            } else {
                eprintln!("kci: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config, env_errors) = KciConfig::from_env();
    for err in &env_errors {
        warn!("{err}; using default");
    }

    let client = DashboardClient::from_config(&config);
    let ctx = Context {
        config: &config,
        client: &client,
        log_dir: std::env::current_dir()?,
    };
    let (mut stdout, mut stderr) = (io::stdout(), io::stderr());
    let mut output = Output {
        out: &mut stdout,
        info: &mut stderr,
    };

    match &cli.command {
        Commands::Results { command } => commands::run(command, &ctx, &mut output),
    }
}
