//! Authentication context.
//!
//! # Responsibility
//! - Hold the current session and the last auth error for one client.
//! - Route sign-up, sign-in, sign-out and refresh through the backend.
//!
//! # Invariants
//! - There is no process-wide session: the context is an explicit value owned
//!   by the application and lent to the shell and pages.
//! - All mutations take `&mut self`, so there is exactly one writer at a time
//!   and every reader observes the result synchronously.
//! - `sign_out` always clears local state, even when backend revocation fails.

use crate::backend::{Backend, BackendError, BackendResult};
use crate::model::user::{Session, User};
use chrono::Utc;
use log::{info, warn};
use std::time::Instant;

pub type AuthResult<T> = Result<T, BackendError>;

/// Session state shared by every view of one running client.
#[derive(Debug, Default)]
pub struct AuthContext {
    session: Option<Session>,
    last_error: Option<String>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Message of the most recent failed auth call; cleared by the next call.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Creates a backend account and makes its session current.
    pub fn sign_up<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> AuthResult<&User> {
        self.establish("sign_up", || backend.sign_up(email, password))
    }

    /// Authenticates an existing account and makes its session current.
    pub fn sign_in<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> AuthResult<&User> {
        self.establish("sign_in", || backend.sign_in(email, password))
    }

    /// Revokes the backend session and clears local state.
    ///
    /// Signing out without a session is a no-op.
    pub fn sign_out<B: Backend + ?Sized>(&mut self, backend: &B) -> AuthResult<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        self.last_error = None;
        let result = backend.sign_out(&session);

        match result {
            Ok(()) => {
                info!(
                    "event=auth module=auth op=sign_out status=ok user_id={}",
                    session.user.id
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=auth module=auth op=sign_out status=error user_id={} error_code={}",
                    session.user.id,
                    err.code()
                );
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Re-validates the current session with the backend.
    ///
    /// Clears local state when the session is past `expires_at` (no backend
    /// call) or when the backend reports it expired or revoked. Returns the
    /// still-valid user, if any.
    pub fn refresh<B: Backend + ?Sized>(&mut self, backend: &B) -> AuthResult<Option<&User>> {
        let Some(session) = self.session.as_ref() else {
            return Ok(None);
        };
        if session.is_expired_at(Utc::now()) {
            self.clear_expired();
            return Ok(None);
        }

        let result = backend.session_user(session);

        match result {
            Ok(Some(user)) => {
                if let Some(session) = self.session.as_mut() {
                    session.user = user;
                }
                Ok(self.user())
            }
            Ok(None) => {
                self.clear_expired();
                Ok(None)
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn clear_expired(&mut self) {
        if let Some(expired) = self.session.take() {
            info!(
                "event=auth module=auth op=refresh status=ok outcome=expired user_id={}",
                expired.user.id
            );
        }
    }

    fn establish(
        &mut self,
        op: &str,
        call: impl FnOnce() -> BackendResult<Session>,
    ) -> AuthResult<&User> {
        let started_at = Instant::now();
        self.last_error = None;
        let result = call();

        match result {
            Ok(session) => {
                info!(
                    "event=auth module=auth op={op} status=ok user_id={} duration_ms={}",
                    session.user.id,
                    started_at.elapsed().as_millis()
                );
                Ok(&self.session.insert(session).user)
            }
            Err(err) => {
                warn!(
                    "event=auth module=auth op={op} status=error duration_ms={} error_code={}",
                    started_at.elapsed().as_millis(),
                    err.code()
                );
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
