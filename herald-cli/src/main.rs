//! Herald CLI - Command line interface for Herald
//!
//! Core reviewer assignment for pull requests, driven from CI with JSON
//! snapshots fetched from the hosting API.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use herald_core::{Config, Selection};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ChooseArgs, FindArgs, FormatArgs, PoolArgs};

/// Herald: core reviewer assignment for pull requests
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/herald/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Primary reviewer selection: first or rotate (overrides config and env)
    #[arg(long, global = true)]
    selection: Option<Selection>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Choose core reviewers for a pull request
    #[command(visible_alias = "c")]
    Choose(ChooseArgs),

    /// Print the reviewer assignment comment for a reviewer
    Format(FormatArgs),

    /// Find the latest reviewer assignment among comments
    Find(FindArgs),

    /// List reviewers available for assignment
    Pool(PoolArgs),

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.config.as_deref(), cli.selection)?;

    if cli.verbose {
        tracing::info!(
            selection = %config.assignment.selection,
            default_pool = ?config.pool.default,
            teams = config.pool.teams.len(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("herald {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Choose(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Format(args)) => {
            args.execute();
        }
        Some(Commands::Find(args)) => {
            args.execute()?;
        }
        Some(Commands::Pool(args)) => {
            args.execute(&config)?;
        }
        Some(Commands::Config) => {
            println!("Herald Configuration");
            println!("====================");
            println!();
            println!("Assignment Settings:");
            println!("  selection: {}", config.assignment.selection);
            println!();
            println!("Reviewer Pools:");
            println!("  default: {}", config.pool.default.join(", "));
            for (team, members) in &config.pool.teams {
                println!("  {}: {}", team, members.join(", "));
            }
            if !config.pool.vacations.is_empty() {
                println!();
                println!("Vacations:");
                for v in &config.pool.vacations {
                    println!("  {}: {} to {}", v.login, v.start, v.end);
                }
            }
            println!();
            let path = cli.config.clone().or_else(Config::default_config_path);
            if let Some(path) = path {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
            if let Err(e) = config.validate() {
                println!();
                println!("Warning: {}", e);
            }
        }
        None => {
            println!("Herald - Core reviewer assignment for pull requests");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
