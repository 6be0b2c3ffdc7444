//! Email/password input shared by the account and sign-in forms.

use crate::view::cancel::CancellationToken;
use crate::view::SubmitRejected;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Email,
    Password,
}

impl CredentialField {
    pub const ALL: [CredentialField; 2] = [Self::Email, Self::Password];

    pub fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Self::Email => "Email is required",
            Self::Password => "Password is required",
        }
    }
}

impl Display for CredentialField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Keeps the password out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn field(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Email => &self.email,
            CredentialField::Password => &self.password,
        }
    }

    pub fn set_field(&mut self, field: CredentialField, value: impl Into<String>) {
        match field {
            CredentialField::Email => self.email = value.into(),
            CredentialField::Password => self.password = value.into(),
        }
    }

    /// Fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<CredentialField> {
        CredentialField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }
}

/// Input, required-field errors and in-flight flag of a credentials form.
#[derive(Debug, Default)]
pub(crate) struct CredentialsForm {
    input: Credentials,
    missing: Vec<CredentialField>,
    submitting: bool,
    attempted: bool,
    token: CancellationToken,
}

impl CredentialsForm {
    pub(crate) fn input(&self) -> &Credentials {
        &self.input
    }

    pub(crate) fn set_field(&mut self, field: CredentialField, value: impl Into<String>) {
        self.input.set_field(field, value);
        if self.attempted {
            self.missing = self.input.missing_fields();
        }
    }

    pub(crate) fn field_error(&self, field: CredentialField) -> Option<&'static str> {
        self.missing
            .contains(&field)
            .then(|| field.required_message())
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates and marks the form in flight; returns the input snapshot and
    /// a clone of the form's token.
    pub(crate) fn begin(&mut self) -> Result<(Credentials, CancellationToken), SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        self.attempted = true;
        self.missing = self.input.missing_fields();
        if !self.missing.is_empty() {
            return Err(SubmitRejected::Invalid);
        }
        self.submitting = true;
        Ok((self.input.clone(), self.token.clone()))
    }

    pub(crate) fn finish(&mut self) {
        self.submitting = false;
    }
}

impl Drop for CredentialsForm {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
