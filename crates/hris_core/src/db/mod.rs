//! SQLite storage bootstrap for the embedded backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by [`crate::backend::LocalBackend`].
//! - Apply the backend's own schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - The `employees` table is NOT created here; it is created on demand by
//!   the `initialize_database` procedure during schema bootstrap.

use thiserror::Error;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(
        "database schema version {db_version} is newer than supported {latest_supported}"
    )]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
