//! Employee schema bootstrap.
//!
//! # Responsibility
//! - Check for the employee table with a minimal read.
//! - Invoke the `initialize_database` procedure when the table is missing.
//!
//! # Invariants
//! - Only not-found-class read failures trigger initialization.
//! - Every other failure is logged and propagated to the caller.
//! - Not safe against concurrent callers; runs once at application start.

use crate::backend::{Backend, BackendResult, INITIALIZE_DATABASE};
use log::{error, info};
use std::time::Instant;

/// Outcome of [`ensure_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The employee table already existed.
    Ready,
    /// The table was missing and has been created by the remote procedure.
    Initialized,
}

/// Ensures the employee table exists before first use.
pub fn ensure_schema<B: Backend + ?Sized>(backend: &B) -> BackendResult<SchemaStatus> {
    let started_at = Instant::now();

    let read_err = match backend.select_employee_ids(1) {
        Ok(_) => {
            info!(
                "event=schema_bootstrap module=repo status=ok outcome=ready duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Ok(SchemaStatus::Ready);
        }
        Err(err) => err,
    };

    if !read_err.is_not_found() {
        error!(
            "event=schema_bootstrap module=repo status=error stage=check error_code={} error={}",
            read_err.code(),
            read_err
        );
        return Err(read_err);
    }

    info!("event=schema_bootstrap module=repo status=start stage=initialize");
    if let Err(err) = backend.rpc(INITIALIZE_DATABASE) {
        error!(
            "event=schema_bootstrap module=repo status=error stage=initialize error_code={} error={}",
            err.code(),
            err
        );
        return Err(err);
    }

    info!(
        "event=schema_bootstrap module=repo status=ok outcome=initialized duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(SchemaStatus::Initialized)
}
