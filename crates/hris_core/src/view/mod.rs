//! Page view-models.
//!
//! # Responsibility
//! - Hold per-page state (form input, field errors, list render state).
//! - Issue pending operations that the application driver executes against
//!   the backend, then apply their results.
//!
//! # Invariants
//! - Views never call the backend during `begin_*`; every round-trip happens
//!   in a pending operation's `execute`.
//! - Dropping a view cancels its token; cancelled pending operations neither
//!   reach the backend nor change view state.

use thiserror::Error;

pub mod account_form;
pub mod cancel;
pub mod credentials;
pub mod employee_form;
pub mod employee_list;
pub mod login_form;
pub mod shell;

pub use account_form::{AccountFormView, PendingSignUp};
pub use cancel::CancellationToken;
pub use credentials::{CredentialField, Credentials};
pub use employee_form::{EmployeeFormView, PendingSubmit};
pub use employee_list::{EmployeeListView, ListState, PendingFetch};
pub use login_form::{LoginFormView, PendingSignIn};
pub use shell::{Layout, NavAction, NavItem, Route, NAV_ITEMS};

/// Reason a form refused to start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the form has validation errors")]
    Invalid,
}
