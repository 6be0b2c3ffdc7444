//! Account registration form.
//!
//! Sign-up failures are logged and the form stays put; no message is shown.

use crate::auth::{AuthContext, AuthResult};
use crate::backend::Backend;
use crate::model::user::User;
use crate::view::cancel::CancellationToken;
use crate::view::credentials::{CredentialField, Credentials, CredentialsForm};
use crate::view::shell::Route;
use crate::view::SubmitRejected;
use log::{debug, warn};

/// Sign-up issued by [`AccountFormView::begin_submit`].
#[derive(Debug)]
pub struct PendingSignUp {
    credentials: Credentials,
    token: CancellationToken,
}

impl PendingSignUp {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn execute<B: Backend + ?Sized>(
        &self,
        auth: &mut AuthContext,
        backend: &B,
    ) -> Option<AuthResult<User>> {
        if self.is_cancelled() {
            debug!("event=account_register module=view status=skipped reason=cancelled");
            return None;
        }
        Some(
            auth.sign_up(backend, &self.credentials.email, &self.credentials.password)
                .cloned(),
        )
    }
}

#[derive(Debug, Default)]
pub struct AccountFormView {
    form: CredentialsForm,
}

impl AccountFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &Credentials {
        self.form.input()
    }

    pub fn set_field(&mut self, field: CredentialField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn field_error(&self, field: CredentialField) -> Option<&'static str> {
        self.form.field_error(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    pub fn begin_submit(&mut self) -> Result<PendingSignUp, SubmitRejected> {
        let (credentials, token) = self.form.begin()?;
        Ok(PendingSignUp { credentials, token })
    }

    pub fn finish_submit(
        &mut self,
        pending: PendingSignUp,
        result: AuthResult<User>,
    ) -> Option<Route> {
        if pending.is_cancelled() {
            return None;
        }
        self.form.finish();

        match result {
            Ok(_) => Some(Route::Employees),
            Err(err) => {
                warn!(
                    "event=account_register module=view status=error error_code={}",
                    err.code()
                );
                None
            }
        }
    }

    pub fn submit<B: Backend + ?Sized>(
        &mut self,
        auth: &mut AuthContext,
        backend: &B,
    ) -> Result<Option<Route>, SubmitRejected> {
        let pending = self.begin_submit()?;
        Ok(match pending.execute(auth, backend) {
            Some(result) => self.finish_submit(pending, result),
            None => None,
        })
    }
}
