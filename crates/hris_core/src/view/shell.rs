//! Routes, navigation chrome and the authentication guard.
//!
//! # Invariants
//! - Employee routes require an authenticated session; the guard rewrites
//!   them to [`Route::Login`] otherwise.
//! - Unauthenticated visitors get the bare page outlet; authenticated ones
//!   get the navigation bar around it.

use crate::auth::AuthContext;
use std::fmt::{Display, Formatter};

/// Application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Employees,
    RegisterEmployee,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Self::Login,
        Self::Register,
        Self::Employees,
        Self::RegisterEmployee,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Employees => "/employees",
            Self::RegisterEmployee => "/register-employee",
        }
    }

    /// Parses a route path. A trailing slash is ignored and the root path
    /// maps to the employee list.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        if path == "/" {
            return Some(Self::Employees);
        }
        let path = path.strip_suffix('/').unwrap_or(path);
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub fn requires_auth(self) -> bool {
        matches!(self, Self::Employees | Self::RegisterEmployee)
    }

    /// Page heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::Register => "Create Account",
            Self::Employees => "Employees",
            Self::RegisterEmployee => "Register Employee",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Page chrome around the outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Bare,
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Open(Route),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub action: NavAction,
}

/// Navigation bar entries, top to bottom.
pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Employees",
        action: NavAction::Open(Route::Employees),
    },
    NavItem {
        label: "Register Employee",
        action: NavAction::Open(Route::RegisterEmployee),
    },
    NavItem {
        label: "Sign Out",
        action: NavAction::SignOut,
    },
];

pub fn layout_for(auth: &AuthContext) -> Layout {
    if auth.is_authenticated() {
        Layout::Navigation
    } else {
        Layout::Bare
    }
}

/// Returns the route that should actually render for `requested`.
pub fn guard(requested: Route, auth: &AuthContext) -> Route {
    if requested.requires_auth() && !auth.is_authenticated() {
        Route::Login
    } else {
        requested
    }
}
