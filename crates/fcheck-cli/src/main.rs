//! fcheck CLI
//!
//! Snapshot a directory, audit it against the snapshot, and package the
//! files needed to repair it.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use colored::Colorize;
use fcheck_core::options::RunOptions;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::Cli;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("{}: {}", "hint".cyan(), hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let options = cli.into_options(&cwd);
    tracing::debug!(mode = ?options.mode(), "resolved options");

    match options {
        RunOptions::Generate(opts) => commands::run_generate(&opts),
        RunOptions::Check(opts) => commands::run_check(&opts),
        RunOptions::Pack(opts) => commands::run_pack(&opts),
    }
}

/// Log to stderr: everything at DEBUG when verbose, else `RUST_LOG` or warnings.
fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}
