use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Employee record keeper backed by a local SQLite database.
#[derive(Debug, Parser)]
#[command(name = "hris", version, long_about = None)]
pub struct Cli {
    /// Extra config file layered over the user config
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override backend database path
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Override log level (trace|debug|info|warn|error)
    #[arg(global = true, long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Override log directory (absolute path)
    #[arg(global = true, long = "log-dir", value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the interactive shell, reading commands from stdin (default)
    Shell,
    /// Create the employee schema if missing and exit
    Init,
}
