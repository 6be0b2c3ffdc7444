//! Core of the HRIS employee record keeper.
//!
//! Owns the employee model, the backend seam and its SQLite-hosted
//! implementation, the auth context, page view-models and the application
//! driver. Front-ends only render state and forward user actions.

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod view;

pub use app::{App, AppError, AppResult, Page};
pub use auth::{AuthContext, AuthResult};
pub use backend::{Backend, BackendError, BackendResult, LocalBackend};
pub use config::{ConfigError, HrisConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, EmployeeField, EmployeeId, EmployeeValidationError, NewEmployee};
pub use model::user::{Session, User};
pub use repo::bootstrap::{ensure_schema, SchemaStatus};
pub use repo::employee_repo::{
    BackendEmployeeRepository, EmployeeRepository, RepoError, RepoResult,
};
pub use search::filter::filter_employees;
pub use view::shell::Route;

