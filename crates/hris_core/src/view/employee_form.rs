//! Employee registration form.
//!
//! # Invariants
//! - Invalid input never produces a pending submission, so no backend call
//!   is made for it.
//! - At most one submission is in flight.
//! - After the first rejected submit, every field edit re-validates the form.

use crate::model::employee::{Employee, EmployeeField, EmployeeValidationError, NewEmployee};
use crate::repo::employee_repo::{EmployeeRepository, RepoResult};
use crate::view::cancel::CancellationToken;
use crate::view::shell::Route;
use crate::view::SubmitRejected;
use log::{debug, error};

pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to register employee. Please try again.";

/// Submission issued by [`EmployeeFormView::begin_submit`].
#[derive(Debug)]
pub struct PendingSubmit {
    input: NewEmployee,
    token: CancellationToken,
}

impl PendingSubmit {
    pub fn input(&self) -> &NewEmployee {
        &self.input
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs the insert unless cancelled.
    pub fn execute<R: EmployeeRepository + ?Sized>(&self, repo: &R) -> Option<RepoResult<Employee>> {
        if self.is_cancelled() {
            debug!("event=employee_submit module=view status=skipped reason=cancelled");
            return None;
        }
        Some(repo.create_employee(&self.input))
    }
}

#[derive(Debug, Default)]
pub struct EmployeeFormView {
    input: NewEmployee,
    field_errors: Vec<EmployeeValidationError>,
    submit_error: Option<String>,
    submitting: bool,
    attempted: bool,
    token: CancellationToken,
}

impl EmployeeFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &NewEmployee {
        &self.input
    }

    pub fn set_field(&mut self, field: EmployeeField, value: impl Into<String>) {
        self.input.set_field(field, value);
        if self.attempted {
            self.field_errors = self.input.validation_errors();
        }
    }

    pub fn field_error(&self, field: EmployeeField) -> Option<&EmployeeValidationError> {
        self.field_errors.iter().find(|err| err.field() == field)
    }

    pub fn field_errors(&self) -> &[EmployeeValidationError] {
        &self.field_errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }

        self.attempted = true;
        self.field_errors = self.input.validation_errors();
        if !self.field_errors.is_empty() {
            debug!(
                "event=employee_submit module=view status=rejected invalid_fields={}",
                self.field_errors.len()
            );
            return Err(SubmitRejected::Invalid);
        }

        self.submit_error = None;
        self.submitting = true;
        Ok(PendingSubmit {
            input: self.input.clone(),
            token: self.token.clone(),
        })
    }

    /// Applies a submission result; returns the route to navigate to on
    /// success.
    pub fn finish_submit(
        &mut self,
        pending: PendingSubmit,
        result: RepoResult<Employee>,
    ) -> Option<Route> {
        if pending.is_cancelled() {
            return None;
        }
        self.submitting = false;

        match result {
            Ok(_) => Some(Route::Employees),
            Err(err) => {
                error!("event=employee_submit module=view status=error error={err}");
                let message = err.to_string();
                self.submit_error = Some(if message.trim().is_empty() {
                    SUBMIT_FAILED_MESSAGE.to_string()
                } else {
                    message
                });
                None
            }
        }
    }

    /// Issues, executes and applies one submission.
    pub fn submit<R: EmployeeRepository + ?Sized>(
        &mut self,
        repo: &R,
    ) -> Result<Option<Route>, SubmitRejected> {
        let pending = self.begin_submit()?;
        Ok(match pending.execute(repo) {
            Some(result) => self.finish_submit(pending, result),
            None => None,
        })
    }
}

impl Drop for EmployeeFormView {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
