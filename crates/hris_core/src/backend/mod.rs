//! Backend-as-a-service seam.
//!
//! # Responsibility
//! - Define the operations the application needs from its managed backend:
//!   employee table access, remote procedures and the auth service.
//! - Classify backend failures so callers can single out not-found errors.
//!
//! # Invariants
//! - Every trait method is exactly one backend round-trip.
//! - `select_employees` may answer `None` for an empty payload; callers
//!   normalize it.

use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeId, NewEmployee};
use crate::model::user::{Session, User};
use chrono::{DateTime, Utc};
use thiserror::Error;

mod local;
mod password;
mod procedures;

pub use local::LocalBackend;
pub use procedures::INITIALIZE_DATABASE;

/// Table name of employee rows.
pub const EMPLOYEES_TABLE: &str = "employees";

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by a backend call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The addressed table does not exist (yet).
    #[error("relation `{0}` does not exist")]
    RelationNotFound(String),
    #[error("procedure `{0}` does not exist")]
    ProcedureNotFound(String),
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("User already registered")]
    UserAlreadyExists,
    #[error("{0}")]
    InvalidInput(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("invalid backend row: {0}")]
    InvalidData(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    /// Transport-level failure (connection lost, service down).
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl BackendError {
    /// Returns whether this is a "resource not found"-class failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RelationNotFound(_))
    }

    /// Stable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RelationNotFound(_) => "relation_not_found",
            Self::ProcedureNotFound(_) => "procedure_not_found",
            Self::InvalidCredentials => "invalid_credentials",
            Self::UserAlreadyExists => "user_already_exists",
            Self::InvalidInput(_) => "invalid_input",
            Self::Constraint(_) => "constraint_violation",
            Self::InvalidData(_) => "invalid_data",
            Self::PasswordHash(_) => "password_hash_failed",
            Self::Unavailable(_) => "unavailable",
            Self::Db(_) => "db_error",
        }
    }
}

impl From<rusqlite::Error> for BackendError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Insert payload: the five employee fields plus the client-side timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeInsert {
    pub fields: NewEmployee,
    pub created_at: DateTime<Utc>,
}

/// Operations provided by the managed backend.
pub trait Backend {
    /// Minimal read of up to `limit` employee identifiers.
    fn select_employee_ids(&self, limit: u32) -> BackendResult<Vec<EmployeeId>>;
    /// Inserts one employee and returns the persisted row.
    fn insert_employee(&self, row: &EmployeeInsert) -> BackendResult<Employee>;
    /// Returns all employees ordered by `created_at` descending.
    fn select_employees(&self) -> BackendResult<Option<Vec<Employee>>>;
    /// Invokes a named remote procedure without arguments.
    fn rpc(&self, procedure: &str) -> BackendResult<()>;

    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session>;
    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session>;
    /// Revokes the session. Revoking an unknown or revoked session succeeds.
    fn sign_out(&self, session: &Session) -> BackendResult<()>;
    /// Returns the session's user while the session is still valid.
    fn session_user(&self, session: &Session) -> BackendResult<Option<User>>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn select_employee_ids(&self, limit: u32) -> BackendResult<Vec<EmployeeId>> {
        (**self).select_employee_ids(limit)
    }

    fn insert_employee(&self, row: &EmployeeInsert) -> BackendResult<Employee> {
        (**self).insert_employee(row)
    }

    fn select_employees(&self) -> BackendResult<Option<Vec<Employee>>> {
        (**self).select_employees()
    }

    fn rpc(&self, procedure: &str) -> BackendResult<()> {
        (**self).rpc(procedure)
    }

    fn sign_up(&self, email: &str, password: &str) -> BackendResult<Session> {
        (**self).sign_up(email, password)
    }

    fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        (**self).sign_in(email, password)
    }

    fn sign_out(&self, session: &Session) -> BackendResult<()> {
        (**self).sign_out(session)
    }

    fn session_user(&self, session: &Session) -> BackendResult<Option<User>> {
        (**self).session_user(session)
    }
}
