//! Repository layer over the backend seam.
//!
//! # Responsibility
//! - Provide use-case oriented employee data access.
//! - Own the one-time schema bootstrap performed at application start.
//!
//! # Invariants
//! - Repository writes must pass `NewEmployee::validate()` before any
//!   backend call.
//! - Backend errors are propagated unchanged inside `RepoError::Backend`.

pub mod bootstrap;
pub mod employee_repo;
