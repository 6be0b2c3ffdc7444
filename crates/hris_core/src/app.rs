//! Application driver.
//!
//! # Responsibility
//! - Own the backend, the auth context and the currently mounted page.
//! - Run schema bootstrap once at start.
//! - Execute pending operations issued by pages and apply navigation.
//!
//! # Invariants
//! - Exactly one page is mounted; navigating drops the previous page, which
//!   cancels its outstanding work.
//! - Employee routes are only mounted for an authenticated, unexpired
//!   session.

use crate::auth::AuthContext;
use crate::backend::{Backend, BackendError};
use crate::model::employee::EmployeeField;
use crate::repo::bootstrap::{ensure_schema, SchemaStatus};
use crate::repo::employee_repo::BackendEmployeeRepository;
use crate::view::credentials::CredentialField;
use crate::view::shell::{self, Layout, Route};
use crate::view::{
    AccountFormView, EmployeeFormView, EmployeeListView, LoginFormView, SubmitRejected,
};
use log::{info, warn};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("schema bootstrap failed: {0}")]
    Schema(#[source] BackendError),
    #[error("unknown route `{0}`")]
    UnknownRoute(String),
    #[error("unknown field `{field}` on {route}")]
    UnknownField { field: String, route: Route },
    #[error("`{action}` is not available on {route}")]
    Unavailable { action: &'static str, route: Route },
    #[error(transparent)]
    Rejected(#[from] SubmitRejected),
}

/// Currently mounted page.
#[derive(Debug)]
pub enum Page {
    Login(LoginFormView),
    Register(AccountFormView),
    Employees(EmployeeListView),
    RegisterEmployee(EmployeeFormView),
}

impl Page {
    fn mount(route: Route) -> Self {
        match route {
            Route::Login => Self::Login(LoginFormView::new()),
            Route::Register => Self::Register(AccountFormView::new()),
            Route::Employees => Self::Employees(EmployeeListView::new()),
            Route::RegisterEmployee => Self::RegisterEmployee(EmployeeFormView::new()),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Login(_) => Route::Login,
            Self::Register(_) => Route::Register,
            Self::Employees(_) => Route::Employees,
            Self::RegisterEmployee(_) => Route::RegisterEmployee,
        }
    }
}

pub struct App<B: Backend> {
    backend: B,
    auth: AuthContext,
    page: Page,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            auth: AuthContext::new(),
            page: Page::mount(Route::Login),
        }
    }

    /// Ensures the employee schema exists and mounts the landing page.
    ///
    /// # Errors
    /// - Returns [`AppError::Schema`] when the schema check fails for a reason other
    ///   than a missing table, or when initialization fails.
    pub fn start(&mut self) -> AppResult<SchemaStatus> {
        let status = ensure_schema(&self.backend).map_err(AppError::Schema)?;
        self.navigate(Route::Employees);
        Ok(status)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn route(&self) -> Route {
        self.page.route()
    }

    pub fn layout(&self) -> Layout {
        shell::layout_for(&self.auth)
    }

    /// Mounts `requested` (or the login page when the guard refuses it) and
    /// returns the route actually mounted.
    pub fn navigate(&mut self, requested: Route) -> Route {
        if requested.requires_auth() && self.auth.is_authenticated() {
            if let Err(err) = self.auth.refresh(&self.backend) {
                warn!(
                    "event=navigate module=app status=error stage=refresh error_code={}",
                    err.code()
                );
            }
        }

        let route = shell::guard(requested, &self.auth);
        if route != requested {
            info!(
                "event=navigate module=app status=ok outcome=redirect requested={} route={}",
                requested, route
            );
        }

        // Replacing the page drops the previous view and cancels its work.
        self.page = Page::mount(route);
        if let Page::Employees(list) = &mut self.page {
            list.fetch(&BackendEmployeeRepository::new(&self.backend));
        }
        route
    }

    pub fn open_path(&mut self, path: &str) -> AppResult<Route> {
        let route =
            Route::from_path(path).ok_or_else(|| AppError::UnknownRoute(path.to_string()))?;
        Ok(self.navigate(route))
    }

    /// Sets one input field of the mounted form.
    pub fn set_field(&mut self, key: &str, value: &str) -> AppResult<()> {
        let route = self.route();
        let unknown = || AppError::UnknownField {
            field: key.to_string(),
            route,
        };

        match &mut self.page {
            Page::Login(form) => {
                form.set_field(CredentialField::from_key(key).ok_or_else(unknown)?, value)
            }
            Page::Register(form) => {
                form.set_field(CredentialField::from_key(key).ok_or_else(unknown)?, value)
            }
            Page::RegisterEmployee(form) => {
                form.set_field(EmployeeField::from_key(key).ok_or_else(unknown)?, value)
            }
            Page::Employees(_) => {
                return Err(AppError::Unavailable {
                    action: "set",
                    route,
                })
            }
        }
        Ok(())
    }

    /// Submits the mounted form and follows the resulting navigation.
    ///
    /// Returns the route mounted afterwards.
    pub fn submit(&mut self) -> AppResult<Route> {
        let next = match &mut self.page {
            Page::Login(form) => form.submit(&mut self.auth, &self.backend)?,
            Page::Register(form) => form.submit(&mut self.auth, &self.backend)?,
            Page::RegisterEmployee(form) => {
                form.submit(&BackendEmployeeRepository::new(&self.backend))?
            }
            Page::Employees(_) => {
                return Err(AppError::Unavailable {
                    action: "submit",
                    route: Route::Employees,
                })
            }
        };

        Ok(match next {
            Some(route) => self.navigate(route),
            None => self.route(),
        })
    }

    pub fn search(&mut self, term: &str) -> AppResult<()> {
        match &mut self.page {
            Page::Employees(list) => {
                list.set_search(term);
                Ok(())
            }
            page => Err(AppError::Unavailable {
                action: "search",
                route: page.route(),
            }),
        }
    }

    /// Re-runs the employee fetch.
    pub fn retry(&mut self) -> AppResult<()> {
        match &mut self.page {
            Page::Employees(list) => {
                list.fetch(&BackendEmployeeRepository::new(&self.backend));
                Ok(())
            }
            page => Err(AppError::Unavailable {
                action: "retry",
                route: page.route(),
            }),
        }
    }

    /// Clears the session and mounts the login page.
    ///
    /// Backend revocation failures are logged; local state is cleared anyway.
    pub fn sign_out(&mut self) -> Route {
        if let Err(err) = self.auth.sign_out(&self.backend) {
            warn!(
                "event=sign_out module=app status=error error_code={}",
                err.code()
            );
        }
        self.navigate(Route::Login)
    }
}
