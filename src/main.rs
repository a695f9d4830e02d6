//! Quartermaster CLI entry point.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quartermaster::probe::probe;
use quartermaster::{install, RunConfiguration, ToolSpec};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Quartermaster - unattended Quarto CLI installer.
#[derive(Debug, Parser)]
#[command(name = "quartermaster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reinstall even if a working version is already present
    #[arg(short, long, global = true)]
    force: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Install Quarto (default if no command specified)
    Install,

    /// Check whether Quarto is already installed and working
    Check,
}

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default shows warnings and errors only
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("quartermaster=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quartermaster=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    if cli.no_color {
        // SAFETY: called before any other thread is spawned.
        unsafe { std::env::set_var("NO_COLOR", "1") };
    }

    let tool = ToolSpec::quarto();

    match cli.command.unwrap_or(Commands::Install) {
        Commands::Check => {
            let verdict = probe(&tool);
            match verdict.verified_version() {
                Some(version) => {
                    println!("{} {} is installed and working", tool.name, version);
                    ExitCode::SUCCESS
                }
                None => {
                    println!("{} is not installed or not working", tool.name);
                    ExitCode::from(1)
                }
            }
        }
        Commands::Install => {
            let config = RunConfiguration {
                force_reinstall: cli.force,
            };
            let result = install(&tool, &config);

            if let Some(log) = &result.log_location {
                println!("Transcript: {}", log.display());
            }
            if result.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
    }
}
