//! Sign-in form. Backend failures are shown to the user.

use crate::auth::{AuthContext, AuthResult};
use crate::backend::Backend;
use crate::model::user::User;
use crate::view::cancel::CancellationToken;
use crate::view::credentials::{CredentialField, Credentials, CredentialsForm};
use crate::view::shell::Route;
use crate::view::SubmitRejected;
use log::{debug, warn};

/// Sign-in issued by [`LoginFormView::begin_submit`].
#[derive(Debug)]
pub struct PendingSignIn {
    credentials: Credentials,
    token: CancellationToken,
}

impl PendingSignIn {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn execute<B: Backend + ?Sized>(
        &self,
        auth: &mut AuthContext,
        backend: &B,
    ) -> Option<AuthResult<User>> {
        if self.is_cancelled() {
            debug!("event=sign_in module=view status=skipped reason=cancelled");
            return None;
        }
        Some(
            auth.sign_in(backend, &self.credentials.email, &self.credentials.password)
                .cloned(),
        )
    }
}

#[derive(Debug, Default)]
pub struct LoginFormView {
    form: CredentialsForm,
    error: Option<String>,
}

impl LoginFormView {
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

    /// Message of the last failed sign-in.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting()
    }

    pub fn begin_submit(&mut self) -> Result<PendingSignIn, SubmitRejected> {
        let (credentials, token) = self.form.begin()?;
        self.error = None;
        Ok(PendingSignIn { credentials, token })
    }

    pub fn finish_submit(
        &mut self,
        pending: PendingSignIn,
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
                    "event=sign_in module=view status=error error_code={}",
                    err.code()
                );
                self.error = Some(err.to_string());
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
