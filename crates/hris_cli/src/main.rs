//! `hris` command-line front-end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the backend.
//! - Run schema bootstrap (`init`) or the interactive text shell.

mod cli;
mod error;
mod render;
mod shell;

use clap::Parser;
use cli::{Cli, Commands};
use error::CliError;
use hris_core::{init_logging, App, HrisConfig, LocalBackend, SchemaStatus};
use log::info;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(&cli)?;

    // Logging is best-effort; the shell still works without it.
    if let Err(err) = init_logging(&config.logging.level, &config.logging.dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Some(parent) = config.backend.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let backend = LocalBackend::open(&config.backend.database_path)?
        .with_session_ttl(Duration::from_secs(config.backend.session_ttl_secs));
    let mut app = App::new(backend);
    let status = app.start()?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init => {
            let outcome = match status {
                SchemaStatus::Ready => "schema ready",
                SchemaStatus::Initialized => "schema initialized",
            };
            println!("{outcome}: {}", config.backend.database_path.display());
            Ok(())
        }
        Commands::Shell => {
            info!("event=shell_start module=cli status=ok");
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            shell::run(&mut app, stdin.lock(), io::stdout().lock(), interactive)
        }
    }
}

/// Loads layered config, then applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<HrisConfig, CliError> {
    let mut config = HrisConfig::load(cli.config.as_deref())?;
    if let Some(db) = &cli.db {
        config.backend.database_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}
