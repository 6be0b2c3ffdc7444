use hris_core::db::DbError;
use hris_core::{AppError, ConfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open database: {0}")]
    Db(#[from] DbError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed shell input line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("unknown command `{0}`; type `help` for a list")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}
