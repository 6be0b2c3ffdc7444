//! Employee list view: fetch state, retry and search.
//!
//! # Invariants
//! - Exactly one of loading, failed or loaded is rendered at a time.
//! - Each fetch carries a generation; results of a superseded fetch are
//!   dropped.
//! - Search filters the loaded rows synchronously on every change and never
//!   triggers a backend call.

use crate::model::employee::Employee;
use crate::repo::employee_repo::{EmployeeRepository, RepoResult};
use crate::search::filter::EmployeeFilter;
use crate::view::cancel::CancellationToken;
use log::{debug, error, info};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch employees. Please try again later.";
pub const EMPTY_MESSAGE: &str = "No employees added yet.";
pub const NO_MATCH_MESSAGE: &str = "No employees found matching your search.";

/// Render state of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Failed(String),
    Loaded(Vec<Employee>),
}

/// Fetch issued by [`EmployeeListView::begin_fetch`].
#[derive(Debug)]
pub struct PendingFetch {
    generation: u64,
    token: CancellationToken,
}

impl PendingFetch {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Runs the fetch unless it was cancelled; `None` means no backend call
    /// was made.
    pub fn execute<R: EmployeeRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> Option<RepoResult<Vec<Employee>>> {
        if self.is_cancelled() {
            debug!(
                "event=employee_fetch module=view status=skipped reason=cancelled generation={}",
                self.generation
            );
            return None;
        }
        Some(repo.get_employees())
    }
}

#[derive(Debug)]
pub struct EmployeeListView {
    state: ListState,
    search: EmployeeFilter,
    search_term: String,
    generation: u64,
    token: CancellationToken,
}

impl Default for EmployeeListView {
    fn default() -> Self {
        Self {
            state: ListState::Loading,
            search: EmployeeFilter::default(),
            search_term: String::new(),
            generation: 0,
            token: CancellationToken::new(),
        }
    }
}

impl EmployeeListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Enters the loading state and issues a new fetch.
    ///
    /// Used both for the initial load and for retry.
    pub fn begin_fetch(&mut self) -> PendingFetch {
        self.generation += 1;
        self.state = ListState::Loading;
        PendingFetch {
            generation: self.generation,
            token: self.token.clone(),
        }
    }

    /// Applies a fetch result. Returns `false` when the result was ignored
    /// because the fetch was cancelled or superseded.
    pub fn finish_fetch(
        &mut self,
        pending: PendingFetch,
        result: RepoResult<Vec<Employee>>,
    ) -> bool {
        if pending.is_cancelled() || pending.generation != self.generation {
            debug!(
                "event=employee_fetch module=view status=skipped reason=stale generation={} current={}",
                pending.generation, self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(rows) => {
                info!(
                    "event=employee_fetch module=view status=ok count={} generation={}",
                    rows.len(),
                    pending.generation
                );
                ListState::Loaded(rows)
            }
            Err(err) => {
                error!(
                    "event=employee_fetch module=view status=error generation={} error={}",
                    pending.generation, err
                );
                ListState::Failed(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Issues, executes and applies one fetch.
    pub fn fetch<R: EmployeeRepository + ?Sized>(&mut self, repo: &R) {
        let pending = self.begin_fetch();
        if let Some(result) = pending.execute(repo) {
            self.finish_fetch(pending, result);
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.search = EmployeeFilter::new(&self.search_term);
    }

    /// Loaded rows matching the current search term; empty unless loaded.
    pub fn visible_rows(&self) -> Vec<&Employee> {
        match &self.state {
            ListState::Loaded(rows) => self.search.apply(rows),
            ListState::Loading | ListState::Failed(_) => Vec::new(),
        }
    }

    /// Message for a loaded list with no visible rows.
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.state {
            ListState::Loaded(_) if self.visible_rows().is_empty() => {
                if self.search.is_empty() {
                    Some(EMPTY_MESSAGE)
                } else {
                    Some(NO_MATCH_MESSAGE)
                }
            }
            _ => None,
        }
    }

    /// Cancels outstanding work; further results are ignored.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for EmployeeListView {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
