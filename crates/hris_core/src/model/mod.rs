//! Domain model for employee records and authenticated identities.
//!
//! # Responsibility
//! - Define canonical data structures shared by repository, auth and views.
//! - Own field-level validation rules for employee input.
//!
//! # Invariants
//! - An employee identifier is assigned by the backend and never changes.
//! - Employees are created once and never updated or deleted.

pub mod employee;
pub mod user;
