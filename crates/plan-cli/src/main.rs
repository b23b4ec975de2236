//! taskplan CLI
//!
//! Resolves a workspace's project and task configuration into an ordered
//! execution plan.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} task configuration resolver", "taskplan".green().bold());
            println!();
            println!("Run {} for available commands.", "taskplan --help".cyan());
            Ok(())
        }
    }
}

/// Log to stderr: DEBUG with `--verbose`, otherwise whatever `RUST_LOG` asks
/// for (warnings by default).
fn init_tracing(verbose: bool) {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| e.to_string())
    };

    match result {
        Ok(()) => tracing::debug!(verbose, "Tracing initialised"),
        Err(e) => eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e),
    }
}

fn execute_command(cmd: Commands, config: Option<&std::path::Path>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Resolve(args) => commands::run_resolve(&cwd, config, &args),
        Commands::Validate { json } => commands::run_validate(&cwd, config, json),
        Commands::Projects { json } => commands::run_projects(&cwd, config, json),
    }
}
