//! Employee repository contract and backend-backed implementation.
//!
//! # Responsibility
//! - Insert one employee record with a client-side creation timestamp.
//! - Fetch all employee records, newest first.
//!
//! # Invariants
//! - Write paths validate input before the backend is called.
//! - `get_employees` never returns an absent value; a null backend payload
//!   becomes an empty vector.
//! - No uniqueness check: duplicate employees are allowed.
//! - One backend round-trip per call; no retry, pagination or batching.

use crate::backend::{Backend, BackendError, EmployeeInsert};
use crate::model::employee::{Employee, EmployeeValidationError, NewEmployee};
use chrono::{DateTime, Utc};
use log::{error, info};
use std::time::Instant;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employee persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] EmployeeValidationError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Repository interface for employee records.
pub trait EmployeeRepository {
    /// Inserts one employee stamped with the given creation time.
    fn create_employee_at(
        &self,
        fields: &NewEmployee,
        created_at: DateTime<Utc>,
    ) -> RepoResult<Employee>;

    /// Returns all employees ordered by creation time, newest first.
    fn get_employees(&self) -> RepoResult<Vec<Employee>>;

    /// Inserts one employee stamped with the current time.
    fn create_employee(&self, fields: &NewEmployee) -> RepoResult<Employee> {
        self.create_employee_at(fields, Utc::now())
    }
}

/// Employee repository backed by a [`Backend`] implementation.
pub struct BackendEmployeeRepository<'b, B: Backend + ?Sized> {
    backend: &'b B,
}

impl<'b, B: Backend + ?Sized> BackendEmployeeRepository<'b, B> {
    pub fn new(backend: &'b B) -> Self {
        Self { backend }
    }
}

impl<B: Backend + ?Sized> EmployeeRepository for BackendEmployeeRepository<'_, B> {
    fn create_employee_at(
        &self,
        fields: &NewEmployee,
        created_at: DateTime<Utc>,
    ) -> RepoResult<Employee> {
        fields.validate()?;

        let started_at = Instant::now();
        let insert = EmployeeInsert {
            fields: fields.trimmed(),
            created_at,
        };

        match self.backend.insert_employee(&insert) {
            Ok(employee) => {
                info!(
                    "event=employee_create module=repo status=ok employee_id={} duration_ms={}",
                    employee.id,
                    started_at.elapsed().as_millis()
                );
                Ok(employee)
            }
            Err(err) => {
                error!(
                    "event=employee_create module=repo status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err.into())
            }
        }
    }

    fn get_employees(&self) -> RepoResult<Vec<Employee>> {
        let started_at = Instant::now();

        match self.backend.select_employees() {
            Ok(rows) => {
                let employees = rows.unwrap_or_default();
                info!(
                    "event=employee_list module=repo status=ok count={} duration_ms={}",
                    employees.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(employees)
            }
            Err(err) => {
                error!(
                    "event=employee_list module=repo status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err.into())
            }
        }
    }
}
